//! Tunable settings and timing constants
//!
//! Physics constants live next to the code that uses them (see `player`);
//! this module holds what the player or the host can change at runtime.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed simulation rate. Player physics constants are per tick at this rate.
pub const SIMULATION_HZ: f64 = 60.0;

/// Default look sensitivity (radians per pixel of drag)
pub const DEFAULT_LOOK_SENSITIVITY: f32 = 0.015;

/// Presses released before this count as taps (place a block)
pub const TAP_THRESHOLD: Duration = Duration::from_millis(300);

/// Presses held this long remove the targeted block
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(1000);

/// Environment variable overriding the look sensitivity at startup
pub const LOOK_SENSITIVITY_ENV: &str = "VOXEL_LOOK_SENSITIVITY";

/// Runtime settings (look sensitivity is adjustable from the menu)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxSettings {
    pub look_sensitivity: f32,
    pub tap_threshold: Duration,
    pub hold_threshold: Duration,
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            tap_threshold: TAP_THRESHOLD,
            hold_threshold: HOLD_THRESHOLD,
        }
    }
}

impl SandboxSettings {
    /// Defaults, with the look sensitivity taken from `VOXEL_LOOK_SENSITIVITY` if set.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(raw) = std::env::var(LOOK_SENSITIVITY_ENV) {
            settings.apply_sensitivity_text(&raw);
        }
        settings
    }

    /// Set the look sensitivity from user-entered text.
    /// Returns false (and keeps the old value) if the text is not a float.
    pub fn apply_sensitivity_text(&mut self, raw: &str) -> bool {
        match parse_sensitivity(raw) {
            Some(value) => {
                self.look_sensitivity = value;
                true
            }
            None => {
                warn!(
                    "Ignoring look sensitivity {:?}: not a number (keeping {})",
                    raw, self.look_sensitivity
                );
                false
            }
        }
    }

    /// Pretty RON rendering, as written to the startup log
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}

/// Parse a sensitivity value. Anything that parses as a float is accepted.
pub fn parse_sensitivity(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok()
}
