//! Rendering systems
//!
//! Lights, sky colour, and the camera attached to the player rig.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use shared::{CameraLens, Player, PlayerCamera, CAMERA_FAR, CAMERA_FOV_Y, CAMERA_NEAR};

/// Sky blue (0x87ceeb)
const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);

// =============================================================================
// SETUP
// =============================================================================

/// One-time rendering setup.
pub fn setup_rendering(mut commands: Commands) {
    commands.insert_resource(ClearColor(SKY_COLOR));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Rendering setup complete");
}

/// Turn the simulation's camera marker into a real render camera.
///
/// The player root also needs visibility so the hierarchy stays consistent.
pub fn attach_player_camera(
    mut commands: Commands,
    players: Query<Entity, Added<Player>>,
    cameras: Query<Entity, Added<PlayerCamera>>,
) {
    for player in players.iter() {
        commands.entity(player).insert(Visibility::default());
    }

    for camera in cameras.iter() {
        commands.entity(camera).insert((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_Y,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                ..default()
            }),
        ));
        info!("Player camera attached");
    }
}

/// Seed the lens viewport from the window we start with
pub fn init_camera_lens(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut lens: ResMut<CameraLens>,
) {
    let Ok(window) = windows.single() else {
        warn!("No primary window at startup, keeping default viewport {}", lens.viewport);
        return;
    };
    lens.viewport = Vec2::new(window.width(), window.height());
}

/// Keep the lens in step with window size (Bevy updates the projection aspect itself)
pub fn handle_window_resize(mut resized: MessageReader<WindowResized>, mut lens: ResMut<CameraLens>) {
    for event in resized.read() {
        lens.viewport = Vec2::new(event.width, event.height);
        debug!("Viewport resized to {}x{}", event.width, event.height);
    }
}
