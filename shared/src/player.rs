//! Player-related constants and types

use bevy::prelude::*;

/// Horizontal acceleration per tick at full intent
pub const ACCELERATION: f32 = 0.05;

/// Horizontal velocity multiplier per tick with no intent
pub const FRICTION: f32 = 0.88;

/// Maximum horizontal speed (units per tick)
pub const MAX_SPEED: f32 = 0.15;

/// Vertical velocity change per tick
pub const GRAVITY: f32 = -0.01;

/// Lowest allowed player Y (simplified floor collision)
pub const FLOOR_HEIGHT: f32 = 1.0;

/// Below this horizontal speed, friction snaps velocity to zero
pub const REST_EPSILON: f32 = 1e-4;

/// Spawn position, above the floor so the player drops in
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 5.0, 0.0);

/// Camera offset from the player origin (eye level)
pub const EYE_OFFSET: Vec3 = Vec3::new(0.0, 1.6, 0.0);

/// Player body half extents. The body box sits on the player origin.
pub const BODY_HALF_EXTENTS: Vec3 = Vec3::new(0.3, 0.9, 0.3);

/// Marker for the player root entity (the avatar body)
#[derive(Component, Debug)]
pub struct Player;

/// Marker for the camera attached to the player
#[derive(Component, Debug)]
pub struct PlayerCamera;

/// Simulated player state. Only the player controller writes this.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    /// Horizontal velocity (y is always zero)
    pub velocity: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::at(SPAWN_POSITION)
    }
}

impl PlayerState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    /// World-space eye position (camera origin)
    pub fn eye(&self) -> Vec3 {
        self.position + EYE_OFFSET
    }

    /// Axis-aligned body box as (min, max)
    pub fn body_bounds(&self) -> (Vec3, Vec3) {
        let center = self.position + Vec3::Y * BODY_HALF_EXTENTS.y;
        (center - BODY_HALF_EXTENTS, center + BODY_HALF_EXTENTS)
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}
