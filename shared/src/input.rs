//! Abstract input events and the per-frame input state they feed.
//!
//! Device adapters (joystick, touch, mouse, keyboard) live in the client and
//! only ever send `InputEvent`s. The frame loop drains them once per frame.

use bevy::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

use crate::editor::EditRequest;
use crate::look::LookAngles;
use crate::movement::MovementIntent;
use crate::press::PressTracker;

/// Fixed-shape input message from a device adapter
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Joystick moved or released (release sends zero speed)
    MovementIntentChanged(MovementIntent),
    /// Drag delta in screen pixels
    LookDelta(Vec2),
    /// Edit press began (timestamp is time since app start)
    PressStart { at: Duration, screen: Vec2 },
    /// Edit press ended at this screen position
    PressEnd { at: Duration, screen: Vec2 },
}

/// Everything the input adapters have told the simulation so far
#[derive(Resource, Debug, Default)]
pub struct InputState {
    pub intent: MovementIntent,
    pub look: LookAngles,
    pub press: PressTracker,
    /// Edits waiting for the editor, oldest first
    pub pending_edits: VecDeque<EditRequest>,
}

impl InputState {
    pub fn queue_edit(&mut self, edit: EditRequest) {
        self.pending_edits.push_back(edit);
    }
}
