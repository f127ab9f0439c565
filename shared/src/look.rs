//! Look controller: yaw/pitch from drag deltas

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Camera rig angles in radians.
///
/// Yaw turns the player body, pitch tilts only the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Apply a drag delta in screen pixels. Yaw is unbounded; pitch is clamped
    /// to straight up / straight down.
    pub fn apply_delta(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        self.yaw -= delta_x * sensitivity;
        self.pitch -= delta_y * sensitivity;
        self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Rotation of the player body
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Rotation of the camera relative to the body
    pub fn camera_local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch)
    }

    /// World rotation of the camera
    pub fn camera_rotation(&self) -> Quat {
        self.body_rotation() * self.camera_local_rotation()
    }

    pub fn forward(&self) -> Vec3 {
        self.camera_rotation() * Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_right_turns_right() {
        let mut look = LookAngles::default();
        look.apply_delta(10.0, 0.0, 0.015);
        assert!((look.yaw + 0.15).abs() < 1e-6);
        // Negative yaw about +Y turns -Z toward +X
        assert!(look.forward().x > 0.0);
    }

    #[test]
    fn test_drag_up_looks_up() {
        let mut look = LookAngles::default();
        look.apply_delta(0.0, -10.0, 0.015);
        assert!(look.pitch > 0.0);
        assert!(look.forward().y > 0.0);
    }

    #[test]
    fn test_pitch_always_clamped() {
        let mut look = LookAngles::default();
        for _ in 0..1000 {
            look.apply_delta(3.0, 250.0, 0.015);
            assert!(look.pitch >= -FRAC_PI_2 && look.pitch <= FRAC_PI_2);
        }
        assert_eq!(look.pitch, -FRAC_PI_2);

        look.apply_delta(0.0, -1.0e9, 0.015);
        assert_eq!(look.pitch, FRAC_PI_2);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut look = LookAngles::default();
        for _ in 0..100 {
            look.apply_delta(-100.0, 0.0, 0.015);
        }
        assert!(look.yaw > 100.0);
    }

    #[test]
    fn test_pitch_only_tilts_camera() {
        let look = LookAngles {
            yaw: 0.4,
            pitch: 0.9,
        };
        assert_eq!(look.body_rotation(), Quat::from_rotation_y(0.4));
        let flat = LookAngles { yaw: 0.4, pitch: 0.0 };
        assert!(flat.camera_rotation().angle_between(look.body_rotation()) < 1e-5);
    }
}
