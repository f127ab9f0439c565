//! Voxel sandbox client - renders the world and turns device input into
//! sandbox input events.
//!
//! Updated for Bevy 0.17

mod crosshair;
mod input;
mod joystick;
mod systems;
mod ui;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use shared::{SandboxPlugin, SandboxSet};

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Voxel Sandbox".to_string(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    }));

    // Simulation: player, terrain, editor, frame ordering
    app.add_plugins(SandboxPlugin);

    app.add_plugins(ui::MenuPlugin);

    app.init_resource::<input::PointerRouter>();

    // Setup systems (run once at startup - rendering and HUD)
    app.add_systems(
        Startup,
        (
            systems::setup_rendering,
            systems::setup_block_assets,
            systems::init_camera_lens,
            joystick::spawn_joystick,
            crosshair::spawn_crosshair,
        ),
    );

    // Device adapters feed the simulation before it consumes input this frame
    app.add_systems(
        Update,
        (
            joystick::follow_window_resize,
            input::route_pointer_input,
            input::keyboard_movement,
        )
            .chain()
            .in_set(SandboxSet::Input),
    );

    app.add_systems(
        Update,
        (
            systems::attach_player_camera,
            systems::spawn_block_visuals,
            systems::handle_window_resize,
            systems::log_block_edits,
            joystick::update_joystick_knob,
        )
            .after(SandboxSet::Simulate),
    );

    info!("Starting voxel sandbox client");
    app.run();
}
