//! Frame loop: wires the simulation into Bevy's schedule.
//!
//! Per frame, in order:
//! 1. `FixedUpdate`: player physics + movement, once per accumulated 60 Hz tick
//! 2. `Update` (`SandboxSet::Input`): client device adapters write `InputEvent`s
//! 3. `Update` (`SandboxSet::Simulate`): drain input → resolve holds → apply
//!    edits → sync the player rig transforms
//! 4. Bevy renders and schedules the next frame
//!
//! Headless: runs under `MinimalPlugins`, no rendering required.

use bevy::prelude::*;

use crate::blocks::{terrain_cells, Block, BlockColor, BlockIndex};
use crate::camera::{screen_ray, CameraLens};
use crate::config::{SandboxSettings, SIMULATION_HZ};
use crate::editor::{resolve_place, resolve_remove, BlockPlaced, BlockRemoved, EditRequest};
use crate::input::{InputEvent, InputState};
use crate::physics::step_player;
use crate::player::{Player, PlayerCamera, PlayerState, EYE_OFFSET};
use crate::press::PressOutcome;
use crate::raycast::{Aabb, LinearScene};

/// Ordering for systems that touch sandbox state in `Update`
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SandboxSet {
    /// Device adapters producing `InputEvent`s
    Input,
    /// Input consumption, edits, rig sync
    Simulate,
}

/// Headless sandbox simulation
pub struct SandboxPlugin;

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SandboxSettings>() {
            app.insert_resource(SandboxSettings::from_env());
        }

        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));
        app.init_resource::<InputState>();
        app.init_resource::<BlockIndex>();
        app.init_resource::<CameraLens>();

        app.add_message::<InputEvent>();
        app.add_message::<BlockPlaced>();
        app.add_message::<BlockRemoved>();

        app.configure_sets(Update, (SandboxSet::Input, SandboxSet::Simulate).chain());

        app.add_systems(Startup, (spawn_player, spawn_terrain, log_settings));

        app.add_systems(FixedUpdate, step_player_system);

        app.add_systems(
            Update,
            (
                consume_input_events,
                resolve_press_hold,
                apply_block_edits,
                sync_player_rig,
            )
                .chain()
                .in_set(SandboxSet::Simulate),
        );
    }
}

// =============================================================================
// STARTUP
// =============================================================================

/// Spawn the player body with its camera child
pub fn spawn_player(mut commands: Commands) {
    let state = PlayerState::default();
    commands
        .spawn((
            Player,
            Transform::from_translation(state.position),
            state,
        ))
        .with_children(|parent| {
            parent.spawn((PlayerCamera, Transform::from_translation(EYE_OFFSET)));
        });
}

/// Spawn the flat terrain grid (once)
pub fn spawn_terrain(mut commands: Commands, mut index: ResMut<BlockIndex>) {
    for cell in terrain_cells() {
        spawn_block(&mut commands, &mut index, cell, BlockColor::Grass);
    }
    info!("Spawned terrain: {} blocks", index.len());
}

fn log_settings(settings: Res<SandboxSettings>) {
    match settings.to_ron() {
        Ok(text) => info!("Sandbox settings:\n{}", text),
        Err(e) => warn!("Failed to render settings as RON ({e}): {:?}", *settings),
    }
}

/// Spawn a block unless its cell is taken
pub fn spawn_block(
    commands: &mut Commands,
    index: &mut BlockIndex,
    cell: IVec3,
    color: BlockColor,
) -> Option<Entity> {
    if index.is_occupied(cell) {
        return None;
    }
    let block = Block::new(cell, color);
    let entity = commands
        .spawn((block, Transform::from_translation(block.center())))
        .id();
    index.insert(cell, entity);
    Some(entity)
}

// =============================================================================
// FIXED TICK
// =============================================================================

/// Player controller, once per fixed tick
pub fn step_player_system(input: Res<InputState>, mut players: Query<&mut PlayerState, With<Player>>) {
    for mut state in players.iter_mut() {
        step_player(&mut state, &input.intent, input.look.yaw);
    }
}

// =============================================================================
// PER FRAME
// =============================================================================

/// Drain this frame's input events into `InputState`
pub fn consume_input_events(
    mut events: MessageReader<InputEvent>,
    mut input: ResMut<InputState>,
    settings: Res<SandboxSettings>,
) {
    for event in events.read() {
        match *event {
            InputEvent::MovementIntentChanged(intent) => {
                input.intent = intent;
            }
            InputEvent::LookDelta(delta) => {
                input
                    .look
                    .apply_delta(delta.x, delta.y, settings.look_sensitivity);
            }
            InputEvent::PressStart { at, .. } => {
                input.press.start(at);
            }
            InputEvent::PressEnd { at, screen } => {
                let outcome = input.press.end(
                    at,
                    screen,
                    settings.tap_threshold,
                    settings.hold_threshold,
                );
                match outcome {
                    Some(PressOutcome::Place(screen)) => {
                        input.queue_edit(EditRequest::Place { screen });
                    }
                    Some(PressOutcome::Remove) => {
                        input.queue_edit(EditRequest::Remove);
                    }
                    Some(PressOutcome::Gesture) => {
                        debug!("Press released in the look-drag window, no edit");
                    }
                    None => {}
                }
            }
        }
    }
}

/// Fire a remove once when the active press has been held long enough
pub fn resolve_press_hold(
    time: Res<Time>,
    settings: Res<SandboxSettings>,
    mut input: ResMut<InputState>,
) {
    if let Some(PressOutcome::Remove) = input.press.poll_hold(time.elapsed(), settings.hold_threshold) {
        input.queue_edit(EditRequest::Remove);
    }
}

/// Resolve queued edits against the scene (all blocks plus the player body)
pub fn apply_block_edits(
    mut commands: Commands,
    mut input: ResMut<InputState>,
    mut index: ResMut<BlockIndex>,
    lens: Res<CameraLens>,
    players: Query<(Entity, &PlayerState), With<Player>>,
    blocks: Query<(Entity, &Block)>,
    mut placed_writer: MessageWriter<BlockPlaced>,
    mut removed_writer: MessageWriter<BlockRemoved>,
) {
    if input.pending_edits.is_empty() {
        return;
    }

    let Ok((player_entity, player)) = players.single() else {
        warn!("apply_block_edits: no player, dropping {} edits", input.pending_edits.len());
        input.pending_edits.clear();
        return;
    };

    let eye = player.eye();
    let rotation = input.look.camera_rotation();

    let mut scene = LinearScene::with_capacity(index.len() + 1);
    for (entity, block) in blocks.iter() {
        scene.insert(entity, block.bounds());
    }
    let (body_min, body_max) = player.body_bounds();
    scene.insert(player_entity, Aabb::new(body_min, body_max));

    while let Some(edit) = input.pending_edits.pop_front() {
        match edit {
            EditRequest::Place { screen } => {
                let Some(ray) = screen_ray(eye, rotation, &lens, screen) else {
                    continue;
                };
                let Some((cell, _)) = resolve_place(&scene, ray) else {
                    debug!("Place at {:?}: nothing under the pointer", screen);
                    continue;
                };
                let Some(entity) = spawn_block(&mut commands, &mut index, cell, BlockColor::Stone)
                else {
                    debug!("Place at {:?}: cell {} is occupied", screen, cell);
                    continue;
                };
                scene.insert(entity, Aabb::unit_cell(cell));
                debug!("Placed block at {}", cell);
                placed_writer.write(BlockPlaced { entity, cell });
            }
            EditRequest::Remove => {
                let Some(ray) = screen_ray(eye, rotation, &lens, lens.center()) else {
                    continue;
                };
                let Some(hit) = resolve_remove(&scene, ray, player_entity) else {
                    debug!("Remove: nothing under the crosshair");
                    continue;
                };
                let Ok((_, block)) = blocks.get(hit.target) else {
                    // Placed earlier this frame, not queryable yet
                    continue;
                };
                let cell = block.cell;
                scene.remove(hit.target);
                index.remove(cell);
                commands.entity(hit.target).despawn();
                debug!("Removed block at {}", cell);
                removed_writer.write(BlockRemoved {
                    entity: hit.target,
                    cell,
                });
            }
        }
    }
}

/// Write simulation state into the transform hierarchy.
///
/// Yaw turns the body; pitch only tilts the camera.
pub fn sync_player_rig(
    input: Res<InputState>,
    mut bodies: Query<(&PlayerState, &mut Transform), (With<Player>, Without<PlayerCamera>)>,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    for (state, mut transform) in bodies.iter_mut() {
        transform.translation = state.position;
        transform.rotation = input.look.body_rotation();
    }
    for mut transform in cameras.iter_mut() {
        transform.rotation = input.look.camera_local_rotation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::TERRAIN_EXTENT;
    use crate::player::FLOOR_HEIGHT;
    use bevy::time::TimeUpdateStrategy;
    use std::f32::consts::FRAC_PI_2;
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SandboxSettings::default());
        app.add_plugins(SandboxPlugin);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.update();
        app
    }

    /// Stand the player on the floor looking straight down at cell (0, -1, 0)
    fn look_down_at_origin(app: &mut App) {
        let world = app.world_mut();
        let mut players = world.query_filtered::<&mut PlayerState, With<Player>>();
        let mut state = players.single_mut(world).unwrap();
        state.position = Vec3::new(0.5, FLOOR_HEIGHT, 0.5);
        state.vertical_velocity = 0.0;
        world.resource_mut::<InputState>().look.pitch = -FRAC_PI_2;
    }

    fn now(app: &App) -> Duration {
        app.world().resource::<Time>().elapsed()
    }

    fn center(app: &App) -> Vec2 {
        app.world().resource::<CameraLens>().center()
    }

    fn count_blocks(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&Block>().iter(world).count()
    }

    fn tap(app: &mut App, held: Duration) {
        let at = now(app);
        let screen = center(app);
        app.world_mut().write_message(InputEvent::PressStart { at, screen });
        app.world_mut().write_message(InputEvent::PressEnd {
            at: at + held,
            screen,
        });
        app.update();
    }

    #[test]
    fn test_startup_spawns_world() {
        let mut app = test_app();
        let terrain = (TERRAIN_EXTENT * TERRAIN_EXTENT) as usize;
        assert_eq!(count_blocks(&mut app), terrain);
        assert_eq!(app.world().resource::<BlockIndex>().len(), terrain);

        let world = app.world_mut();
        let cameras = world.query::<&PlayerCamera>().iter(world).count();
        assert_eq!(cameras, 1);
    }

    #[test]
    fn test_player_lands_on_floor() {
        let mut app = test_app();
        for _ in 0..30 {
            app.update();
        }
        let world = app.world_mut();
        let (state, transform) = world
            .query_filtered::<(&PlayerState, &Transform), With<Player>>()
            .single(world)
            .unwrap();
        assert!(state.grounded);
        assert_eq!(state.position.y, FLOOR_HEIGHT);
        assert_eq!(transform.translation, state.position);
    }

    #[test]
    fn test_tap_places_block_on_terrain() {
        let mut app = test_app();
        look_down_at_origin(&mut app);

        tap(&mut app, Duration::from_millis(100));

        let index = app.world().resource::<BlockIndex>();
        assert!(index.is_occupied(IVec3::new(0, 0, 0)));
        let placed = app.world().resource::<Messages<BlockPlaced>>();
        assert_eq!(placed.len(), 1);
        assert_eq!(count_blocks(&mut app), (TERRAIN_EXTENT * TERRAIN_EXTENT) as usize + 1);
    }

    #[test]
    fn test_release_in_gesture_window_does_nothing() {
        let mut app = test_app();
        look_down_at_origin(&mut app);

        tap(&mut app, Duration::from_millis(500));

        assert!(!app.world().resource::<BlockIndex>().is_occupied(IVec3::ZERO));
        assert!(app.world().resource::<Messages<BlockPlaced>>().is_empty());
    }

    #[test]
    fn test_hold_removes_block_just_placed() {
        let mut app = test_app();
        look_down_at_origin(&mut app);
        tap(&mut app, Duration::from_millis(100));
        assert!(app.world().resource::<BlockIndex>().is_occupied(IVec3::ZERO));

        let at = now(&app);
        let screen = center(&app);
        app.world_mut().write_message(InputEvent::PressStart { at, screen });
        for _ in 0..15 {
            app.update();
        }

        // Removed exactly the placed block; terrain below is intact
        let index = app.world().resource::<BlockIndex>();
        assert!(!index.is_occupied(IVec3::ZERO));
        assert!(index.is_occupied(IVec3::new(0, -1, 0)));
        assert!(!app.world().resource::<InputState>().press.is_pressed());

        let world = app.world_mut();
        let players = world.query::<&Player>().iter(world).count();
        assert_eq!(players, 1);

        // Releasing after the hold fired must not place
        let at = now(&app);
        app.world_mut().write_message(InputEvent::PressEnd { at, screen });
        app.update();
        assert!(!app.world().resource::<BlockIndex>().is_occupied(IVec3::ZERO));
    }

    #[test]
    fn test_long_press_read_in_one_frame_removes() {
        let mut app = test_app();
        look_down_at_origin(&mut app);
        assert!(app.world().resource::<BlockIndex>().is_occupied(IVec3::new(0, -1, 0)));

        tap(&mut app, Duration::from_millis(1500));

        assert!(!app.world().resource::<BlockIndex>().is_occupied(IVec3::new(0, -1, 0)));
        assert_eq!(app.world().resource::<Messages<BlockRemoved>>().len(), 1);
        assert!(app.world().resource::<Messages<BlockPlaced>>().is_empty());
    }

    #[test]
    fn test_look_and_movement_events() {
        let mut app = test_app();
        app.world_mut()
            .write_message(InputEvent::LookDelta(Vec2::new(0.0, 1.0e6)));
        app.world_mut()
            .write_message(InputEvent::MovementIntentChanged(crate::MovementIntent::new(
                FRAC_PI_2, 1.0,
            )));
        app.update();

        let input = app.world().resource::<InputState>();
        assert_eq!(input.look.pitch, -FRAC_PI_2);
        assert_eq!(input.intent.speed, 1.0);

        for _ in 0..10 {
            app.update();
        }
        let world = app.world_mut();
        let state = world
            .query_filtered::<&PlayerState, With<Player>>()
            .single(world)
            .unwrap();
        assert!(state.position.z < 0.0);
        assert!(state.horizontal_speed() <= crate::player::MAX_SPEED + 1e-6);
    }
}
