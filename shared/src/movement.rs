//! Joystick-style movement intent and horizontal steering

use bevy::prelude::*;

use crate::player::{ACCELERATION, FRICTION, MAX_SPEED, REST_EPSILON};

/// Direction and magnitude requested by an input adapter.
///
/// `angle` uses the joystick convention: 0 points right, PI/2 points forward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    pub angle: f32,
    /// Normalized magnitude in 0..=1
    pub speed: f32,
}

impl MovementIntent {
    pub const IDLE: Self = Self {
        angle: 0.0,
        speed: 0.0,
    };

    pub fn new(angle: f32, speed: f32) -> Self {
        Self {
            angle,
            speed: speed.clamp(0.0, 1.0),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.speed > 0.0
    }
}

/// Camera forward projected on the ground plane, and its right-hand perpendicular.
///
/// In Bevy: +X is right, +Y is up, -Z is forward.
pub fn horizontal_basis(yaw: f32) -> (Vec3, Vec3) {
    let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
    (forward, right)
}

/// Update horizontal velocity for one tick: accelerate toward the intent, or
/// decay by friction when there is none.
pub fn apply_movement(velocity: &mut Vec3, intent: &MovementIntent, yaw: f32) {
    if intent.is_moving() {
        let (forward, right) = horizontal_basis(yaw);
        let wish = forward * intent.angle.sin() * intent.speed
            + right * intent.angle.cos() * intent.speed;

        *velocity += wish * ACCELERATION;
        velocity.y = 0.0;
        *velocity = velocity.clamp_length_max(MAX_SPEED);
    } else {
        *velocity *= FRICTION;
        if velocity.length() < REST_EPSILON {
            *velocity = Vec3::ZERO;
        }
    }
}
