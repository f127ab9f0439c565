//! Block definitions and the flat terrain grid
//!
//! Terrain and placed blocks are the same thing: a `Block` on an integer cell.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::raycast::Aabb;

/// Terrain spans `TERRAIN_EXTENT` x `TERRAIN_EXTENT` cells centred on the origin
pub const TERRAIN_EXTENT: i32 = 50;

/// Terrain layer (cells at y = -1, so the walkable top surface is y = 0)
pub const TERRAIN_LAYER: i32 = -1;

/// Block appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockColor {
    /// Terrain
    Grass,
    /// Player-placed
    #[default]
    Stone,
}

impl BlockColor {
    pub fn all() -> &'static [BlockColor] {
        &[BlockColor::Grass, BlockColor::Stone]
    }

    pub fn color(&self) -> Color {
        match self {
            BlockColor::Grass => Color::srgb_u8(0x22, 0x8b, 0x22),
            BlockColor::Stone => Color::srgb(0.55, 0.55, 0.6),
        }
    }
}

/// A unit cube in the world.
///
/// `cell` is the integer min corner; the cube centre is `cell + 0.5`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub cell: IVec3,
    pub color: BlockColor,
}

impl Block {
    pub fn new(cell: IVec3, color: BlockColor) -> Self {
        Self { cell, color }
    }

    pub fn center(&self) -> Vec3 {
        block_center(self.cell)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::unit_cell(self.cell)
    }
}

/// World-space centre of a grid cell
pub fn block_center(cell: IVec3) -> Vec3 {
    cell.as_vec3() + Vec3::splat(0.5)
}

/// Cell adjacent to the face hit at `point` with outward `normal`.
///
/// For a hit point just inside the face plane this is the same cell as
/// `floor(point + normal)`, whose centre is that value plus 0.5 on each axis.
/// Offsetting half a unit along the normal lands in the middle of the
/// neighbouring cell, so the floor is stable even when `point` sits a hair
/// either side of the integer face plane.
pub fn placement_cell(point: Vec3, normal: Vec3) -> IVec3 {
    (point + normal * 0.5).floor().as_ivec3()
}

/// Cells of the terrain grid
pub fn terrain_cells() -> impl Iterator<Item = IVec3> {
    let half = TERRAIN_EXTENT / 2;
    (-half..TERRAIN_EXTENT - half)
        .flat_map(move |x| (-half..TERRAIN_EXTENT - half).map(move |z| IVec3::new(x, TERRAIN_LAYER, z)))
}

/// Occupied cells, kept in sync with block spawns and removals
#[derive(Resource, Default, Debug)]
pub struct BlockIndex {
    cells: HashMap<IVec3, Entity>,
}

impl BlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a block. Returns false if the cell was already taken.
    pub fn insert(&mut self, cell: IVec3, entity: Entity) -> bool {
        if self.cells.contains_key(&cell) {
            return false;
        }
        self.cells.insert(cell, entity);
        true
    }

    pub fn remove(&mut self, cell: IVec3) -> Option<Entity> {
        self.cells.remove(&cell)
    }

    pub fn get(&self, cell: IVec3) -> Option<Entity> {
        self.cells.get(&cell).copied()
    }

    pub fn is_occupied(&self, cell: IVec3) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
