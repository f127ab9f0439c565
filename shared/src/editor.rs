//! Block editor: place and remove blocks by ray hit-testing the scene.

use bevy::prelude::*;

use crate::blocks::placement_cell;
use crate::raycast::{RayQueryable, RayHit, RAY_FAR};

/// A queued edit, resolved against the scene on the next frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditRequest {
    /// Place a block against whatever is under this screen position
    Place { screen: Vec2 },
    /// Remove whatever is under the crosshair
    Remove,
}

/// Sent after a block was added to the world
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct BlockPlaced {
    pub entity: Entity,
    pub cell: IVec3,
}

/// Sent after a block was removed from the world
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct BlockRemoved {
    pub entity: Entity,
    pub cell: IVec3,
}

/// Where a block should go for a ray: the cell in front of the nearest face hit.
pub fn resolve_place<S: RayQueryable>(scene: &S, ray: Ray3d) -> Option<(IVec3, RayHit<S::Target>)> {
    let hit = scene.cast_ray(ray, RAY_FAR).into_iter().next()?;
    Some((placement_cell(hit.point, hit.normal), hit))
}

/// What a ray would remove: the nearest member that is not `protected`.
pub fn resolve_remove<S: RayQueryable>(
    scene: &S,
    ray: Ray3d,
    protected: S::Target,
) -> Option<RayHit<S::Target>> {
    scene.cast_ray_filtered(ray, RAY_FAR, |target| target != protected)
}
