//! World visuals
//!
//! Every `Block` (terrain or placed) gets the same cube mesh and a shared
//! material for its colour.

use bevy::prelude::*;
use shared::{Block, BlockColor, BlockPlaced, BlockRemoved};
use std::collections::HashMap;

/// Shared cube mesh and one material per block colour
#[derive(Resource, Default)]
pub struct BlockAssets {
    pub cube: Handle<Mesh>,
    pub materials: HashMap<BlockColor, Handle<StandardMaterial>>,
}

/// Build block assets once at startup
pub fn setup_block_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));

    let materials = BlockColor::all()
        .iter()
        .map(|color| {
            let material = materials.add(StandardMaterial {
                base_color: color.color(),
                perceptual_roughness: 0.9,
                ..default()
            });
            (*color, material)
        })
        .collect();

    commands.insert_resource(BlockAssets { cube, materials });
}

/// Attach a mesh to newly spawned blocks. Despawning the block removes it.
pub fn spawn_block_visuals(
    mut commands: Commands,
    assets: Res<BlockAssets>,
    blocks: Query<(Entity, &Block), Added<Block>>,
) {
    for (entity, block) in blocks.iter() {
        let Some(material) = assets.materials.get(&block.color) else {
            warn!("No material for block colour {:?}", block.color);
            continue;
        };
        commands
            .entity(entity)
            .insert((Mesh3d(assets.cube.clone()), MeshMaterial3d(material.clone())));
    }
}

/// Console diagnostics for edits
pub fn log_block_edits(
    mut placed: MessageReader<BlockPlaced>,
    mut removed: MessageReader<BlockRemoved>,
) {
    for event in placed.read() {
        info!("Block placed at {}", event.cell);
    }
    for event in removed.read() {
        info!("Block removed at {}", event.cell);
    }
}
