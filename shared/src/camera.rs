//! Camera projection parameters and screen-to-world rays

use bevy::prelude::*;
use std::f32::consts::PI;

/// Vertical field of view (70 degrees)
pub const CAMERA_FOV_Y: f32 = 70.0 * PI / 180.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 500.0;

/// What the simulation needs to know about the camera projection.
///
/// The client keeps `viewport` in sync with the window size.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraLens {
    pub fov_y: f32,
    /// Viewport size in logical pixels
    pub viewport: Vec2,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            fov_y: CAMERA_FOV_Y,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl CameraLens {
    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    pub fn center(&self) -> Vec2 {
        self.viewport * 0.5
    }

    /// Pixel position (origin top-left, y down) to normalized device coordinates
    pub fn to_ndc(&self, screen: Vec2) -> Option<Vec2> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        ))
    }
}

/// Ray from the camera through a screen pixel (pinhole projection).
pub fn screen_ray(eye: Vec3, rotation: Quat, lens: &CameraLens, screen: Vec2) -> Option<Ray3d> {
    let ndc = lens.to_ndc(screen)?;
    let half_height = (lens.fov_y * 0.5).tan();
    let local = Vec3::new(ndc.x * half_height * lens.aspect(), ndc.y * half_height, -1.0);
    let direction = Dir3::new(rotation * local).ok()?;
    Some(Ray3d::new(eye, direction))
}
