//! Tap / hold discrimination for edit presses.
//!
//! - released before `tap_threshold` → place at the release point
//! - held for `hold_threshold` → remove at the crosshair, once; the release
//!   that follows does nothing
//! - released in between → a look-drag gesture, no edit

use bevy::prelude::*;
use std::time::Duration;

/// What a finished (or long-held) press resolved to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressOutcome {
    /// Short tap: place a block at this screen position
    Place(Vec2),
    /// Long hold: remove the block under the crosshair
    Remove,
    /// Released after the tap window but before the hold fired
    Gesture,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePress {
    started_at: Duration,
}

/// Press timing state. Timestamps are time since app start.
#[derive(Debug, Clone, Default)]
pub struct PressTracker {
    active: Option<ActivePress>,
}

impl PressTracker {
    pub fn is_pressed(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a press. A press already in flight is replaced.
    pub fn start(&mut self, at: Duration) {
        self.active = Some(ActivePress { started_at: at });
    }

    /// End a press. Returns None if the press was already consumed by a hold.
    ///
    /// A release at or past `hold_threshold` is a hold even if `poll_hold`
    /// never saw it (start and end read in the same frame).
    pub fn end(
        &mut self,
        at: Duration,
        screen: Vec2,
        tap_threshold: Duration,
        hold_threshold: Duration,
    ) -> Option<PressOutcome> {
        let press = self.active.take()?;
        let held = at.saturating_sub(press.started_at);
        if held >= hold_threshold {
            Some(PressOutcome::Remove)
        } else if held < tap_threshold {
            Some(PressOutcome::Place(screen))
        } else {
            Some(PressOutcome::Gesture)
        }
    }

    /// Check a press still held. Fires `Remove` once when the hold threshold is
    /// reached and clears the press so it cannot fire again.
    pub fn poll_hold(&mut self, now: Duration, hold_threshold: Duration) -> Option<PressOutcome> {
        let press = self.active?;
        if now.saturating_sub(press.started_at) >= hold_threshold {
            self.active = None;
            return Some(PressOutcome::Remove);
        }
        None
    }
}
