//! Device input adapters
//!
//! Touch, mouse and keyboard are turned into `InputEvent`s here; nothing in
//! this module touches the simulation directly.

use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use shared::{InputEvent, MovementIntent};
use std::time::Duration;

use crate::joystick::VirtualJoystick;

/// Which physical pointer a sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One pointer update in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct LookPointer {
    id: PointerId,
    last: Vec2,
}

/// Tracks which pointer is driving look/edit presses.
///
/// The joystick keeps its own owner; everything else that goes down outside
/// the UI becomes the look pointer, one at a time.
#[derive(Resource, Debug, Default)]
pub struct PointerRouter {
    look: Option<LookPointer>,
}

impl PointerRouter {
    /// Turn a pointer sample into at most one input event
    pub fn route(
        &mut self,
        sample: PointerSample,
        joystick: Option<&mut VirtualJoystick>,
        over_ui: bool,
        now: Duration,
    ) -> Option<InputEvent> {
        if let Some(joystick) = joystick {
            if joystick.owner() == Some(sample.id) {
                let intent = match sample.phase {
                    PointerPhase::Up => joystick.release(),
                    PointerPhase::Down | PointerPhase::Move => joystick.drag(sample.position),
                };
                return Some(InputEvent::MovementIntentChanged(intent));
            }
            if sample.phase == PointerPhase::Down && joystick.try_grab(sample.id, sample.position)
            {
                let intent = joystick.drag(sample.position);
                return Some(InputEvent::MovementIntentChanged(intent));
            }
        }

        match sample.phase {
            PointerPhase::Down => {
                if over_ui || self.look.is_some() {
                    return None;
                }
                self.look = Some(LookPointer {
                    id: sample.id,
                    last: sample.position,
                });
                Some(InputEvent::PressStart {
                    at: now,
                    screen: sample.position,
                })
            }
            PointerPhase::Move => {
                let look = self.look.as_mut().filter(|look| look.id == sample.id)?;
                let delta = sample.position - look.last;
                look.last = sample.position;
                (delta != Vec2::ZERO).then_some(InputEvent::LookDelta(delta))
            }
            PointerPhase::Up => {
                self.look.take_if(|look| look.id == sample.id)?;
                Some(InputEvent::PressEnd {
                    at: now,
                    screen: sample.position,
                })
            }
        }
    }
}

/// Collect touch and left-mouse samples and route them
pub fn route_pointer_input(
    mut touches: MessageReader<TouchInput>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    interactions: Query<&Interaction>,
    time: Res<Time>,
    mut router: ResMut<PointerRouter>,
    mut joystick: Option<ResMut<VirtualJoystick>>,
    mut last_cursor: Local<Option<Vec2>>,
    mut writer: MessageWriter<InputEvent>,
) {
    let mut samples = Vec::new();

    for touch in touches.read() {
        let phase = match touch.phase {
            TouchPhase::Started => PointerPhase::Down,
            TouchPhase::Moved => PointerPhase::Move,
            TouchPhase::Ended | TouchPhase::Canceled => PointerPhase::Up,
        };
        samples.push(PointerSample {
            id: PointerId::Touch(touch.id),
            phase,
            position: touch.position,
        });
    }

    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .or(*last_cursor);
    if let Some(position) = cursor {
        let moved = *last_cursor != Some(position);
        for phase in mouse_phases(&mouse, moved) {
            samples.push(PointerSample {
                id: PointerId::Mouse,
                phase,
                position,
            });
        }
        *last_cursor = Some(position);
    }

    if samples.is_empty() {
        return;
    }

    let over_ui = interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None);
    let now = time.elapsed();

    for sample in samples {
        if let Some(event) = router.route(sample, joystick.as_deref_mut(), over_ui, now) {
            writer.write(event);
        }
    }
}

/// Left-button phases for this frame, in order. A click can be pressed and
/// released within one frame (touchpad tap-to-click), which yields both.
fn mouse_phases(mouse: &ButtonInput<MouseButton>, moved: bool) -> Vec<PointerPhase> {
    let pressed = mouse.just_pressed(MouseButton::Left);
    let released = mouse.just_released(MouseButton::Left);
    match (pressed, released) {
        (true, true) if mouse.pressed(MouseButton::Left) => {
            // Released then pressed again: the old press ends first
            vec![PointerPhase::Up, PointerPhase::Down]
        }
        (true, true) => vec![PointerPhase::Down, PointerPhase::Up],
        (true, false) => vec![PointerPhase::Down],
        (false, true) => vec![PointerPhase::Up],
        (false, false) if moved && mouse.pressed(MouseButton::Left) => vec![PointerPhase::Move],
        (false, false) => Vec::new(),
    }
}

/// WASD direction as a joystick-convention intent
pub fn keyboard_intent(forward: bool, back: bool, left: bool, right: bool) -> MovementIntent {
    let x = right as i8 - left as i8;
    let y = forward as i8 - back as i8;
    if x == 0 && y == 0 {
        return MovementIntent::IDLE;
    }
    MovementIntent::new((y as f32).atan2(x as f32), 1.0)
}

/// Keyboard fallback for movement. Silent while the joystick is held.
pub fn keyboard_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    joystick: Option<Res<VirtualJoystick>>,
    mut last_intent: Local<MovementIntent>,
    mut writer: MessageWriter<InputEvent>,
) {
    if joystick.is_some_and(|joystick| joystick.owner().is_some()) {
        *last_intent = MovementIntent::IDLE;
        return;
    }

    let intent = keyboard_intent(
        keyboard.pressed(KeyCode::KeyW),
        keyboard.pressed(KeyCode::KeyS),
        keyboard.pressed(KeyCode::KeyA),
        keyboard.pressed(KeyCode::KeyD),
    );
    if intent != *last_intent {
        *last_intent = intent;
        writer.write(InputEvent::MovementIntentChanged(intent));
    }
}
