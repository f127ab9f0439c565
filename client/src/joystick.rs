//! On-screen virtual joystick
//!
//! A fixed base in the bottom-left corner. A pointer that goes down inside the
//! base owns the joystick until it lifts; dragging emits movement intents and
//! lifting resets the intent to zero.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use shared::MovementIntent;

use crate::input::PointerId;

/// Base radius in logical pixels; a full-radius drag is full speed
pub const JOYSTICK_RADIUS: f32 = 50.0;

/// Base centre distance from the left and bottom window edges
pub const JOYSTICK_MARGIN: f32 = 75.0;

const KNOB_SIZE: f32 = 40.0;
const BASE_COLOR: Color = Color::srgba(0.2, 0.3, 0.9, 0.35);
const KNOB_COLOR: Color = Color::srgba(0.2, 0.3, 0.9, 0.8);

/// Joystick state. Absent when initialization failed (movement then relies on
/// the keyboard fallback).
#[derive(Resource, Debug)]
pub struct VirtualJoystick {
    /// Base centre in window coordinates (origin top-left, y down)
    center: Vec2,
    owner: Option<PointerId>,
    /// Knob offset from the centre, clamped to the base radius
    knob_offset: Vec2,
}

impl VirtualJoystick {
    pub(crate) fn for_window_height(height: f32) -> Result<Self, String> {
        if height < JOYSTICK_MARGIN * 2.0 {
            return Err(format!("window too small for joystick ({height}px tall)"));
        }
        Ok(Self {
            center: Vec2::new(JOYSTICK_MARGIN, height - JOYSTICK_MARGIN),
            owner: None,
            knob_offset: Vec2::ZERO,
        })
    }

    pub fn owner(&self) -> Option<PointerId> {
        self.owner
    }

    /// Take ownership if the pointer went down on the base
    pub fn try_grab(&mut self, pointer: PointerId, position: Vec2) -> bool {
        if self.owner.is_some() || position.distance(self.center) > JOYSTICK_RADIUS {
            return false;
        }
        self.owner = Some(pointer);
        true
    }

    /// Follow the owning pointer
    pub fn drag(&mut self, position: Vec2) -> MovementIntent {
        let (intent, knob_offset) = joystick_intent(self.center, position);
        self.knob_offset = knob_offset;
        intent
    }

    /// Owner lifted
    pub fn release(&mut self) -> MovementIntent {
        self.owner = None;
        self.knob_offset = Vec2::ZERO;
        MovementIntent::IDLE
    }
}

/// Angle (0 = right, PI/2 = up on screen) and normalized distance of a drag,
/// plus the clamped knob offset.
pub fn joystick_intent(center: Vec2, position: Vec2) -> (MovementIntent, Vec2) {
    let delta = position - center;
    let distance = delta.length().min(JOYSTICK_RADIUS);
    if distance <= f32::EPSILON {
        return (MovementIntent::IDLE, Vec2::ZERO);
    }
    // Screen y grows downward; flip so "up" is positive
    let angle = (-delta.y).atan2(delta.x);
    let knob_offset = delta.normalize() * distance;
    (MovementIntent::new(angle, distance / JOYSTICK_RADIUS), knob_offset)
}

/// Marker for the joystick base node
#[derive(Component)]
pub struct JoystickBase;

/// Marker for the joystick knob node
#[derive(Component)]
pub struct JoystickKnob;

/// Create the joystick. Failure is logged and the game runs without it.
pub fn spawn_joystick(mut commands: Commands, windows: Query<&Window, With<PrimaryWindow>>) {
    let joystick = windows
        .single()
        .map_err(|err| format!("no primary window: {err}"))
        .and_then(|window| VirtualJoystick::for_window_height(window.height()));

    let joystick = match joystick {
        Ok(joystick) => joystick,
        Err(err) => {
            error!("Joystick initialization error: {}", err);
            return;
        }
    };

    info!("Joystick initialized at {}", joystick.center);
    commands.insert_resource(joystick);

    let base_size = JOYSTICK_RADIUS * 2.0;
    commands
        .spawn((
            JoystickBase,
            Node {
                width: Val::Px(base_size),
                height: Val::Px(base_size),
                position_type: PositionType::Absolute,
                left: Val::Px(JOYSTICK_MARGIN - JOYSTICK_RADIUS),
                bottom: Val::Px(JOYSTICK_MARGIN - JOYSTICK_RADIUS),
                ..default()
            },
            BackgroundColor(BASE_COLOR),
            BorderRadius::MAX,
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                JoystickKnob,
                knob_node(Vec2::ZERO),
                BackgroundColor(KNOB_COLOR),
                BorderRadius::MAX,
                Pickable::IGNORE,
            ));
        });
}

fn knob_node(offset: Vec2) -> Node {
    let rest = JOYSTICK_RADIUS - KNOB_SIZE / 2.0;
    Node {
        width: Val::Px(KNOB_SIZE),
        height: Val::Px(KNOB_SIZE),
        position_type: PositionType::Absolute,
        left: Val::Px(rest + offset.x),
        top: Val::Px(rest + offset.y),
        ..default()
    }
}

/// Move the knob to match the joystick state
pub fn update_joystick_knob(
    joystick: Option<Res<VirtualJoystick>>,
    mut knobs: Query<&mut Node, With<JoystickKnob>>,
) {
    let Some(joystick) = joystick else {
        return;
    };
    if !joystick.is_changed() {
        return;
    }
    for mut node in knobs.iter_mut() {
        *node = knob_node(joystick.knob_offset);
    }
}

/// The base is anchored to the bottom edge, so its window-space centre moves
/// when the window height changes.
pub fn follow_window_resize(
    mut resized: MessageReader<WindowResized>,
    joystick: Option<ResMut<VirtualJoystick>>,
) {
    let Some(mut joystick) = joystick else {
        resized.clear();
        return;
    };
    for event in resized.read() {
        joystick.center.y = event.height - JOYSTICK_MARGIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const CENTER: Vec2 = Vec2::new(75.0, 645.0);

    #[test]
    fn test_drag_up_is_forward() {
        let (intent, knob) = joystick_intent(CENTER, CENTER + Vec2::new(0.0, -25.0));
        assert!((intent.angle - FRAC_PI_2).abs() < 1e-6);
        assert!((intent.speed - 0.5).abs() < 1e-6);
        assert_eq!(knob, Vec2::new(0.0, -25.0));
    }

    #[test]
    fn test_drag_past_edge_is_full_speed() {
        let (intent, knob) = joystick_intent(CENTER, CENTER + Vec2::new(-200.0, 0.0));
        assert!((intent.angle.abs() - PI).abs() < 1e-6);
        assert_eq!(intent.speed, 1.0);
        assert!((knob.length() - JOYSTICK_RADIUS).abs() < 1e-4);
    }

    #[test]
    fn test_grab_and_release() {
        let mut joystick = VirtualJoystick::for_window_height(720.0).unwrap();
        assert!(!joystick.try_grab(PointerId::Mouse, Vec2::new(600.0, 300.0)));
        assert!(joystick.try_grab(PointerId::Touch(3), Vec2::new(80.0, 640.0)));
        // Already owned
        assert!(!joystick.try_grab(PointerId::Mouse, Vec2::new(75.0, 645.0)));
        assert_eq!(joystick.owner(), Some(PointerId::Touch(3)));

        let intent = joystick.drag(Vec2::new(125.0, 645.0));
        assert_eq!(intent.speed, 1.0);
        assert_eq!(joystick.release(), MovementIntent::IDLE);
        assert_eq!(joystick.owner(), None);
    }

    #[test]
    fn test_tiny_window_fails() {
        assert!(VirtualJoystick::for_window_height(100.0).is_err());
    }
}
