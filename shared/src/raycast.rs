//! Ray queries against scene members.
//!
//! Editing looks blocks up purely by ray intersection. Anything that can
//! answer a distance-sorted ray query implements `RayQueryable`; the default
//! `LinearScene` is a flat list tested one box at a time, which is plenty for
//! a few thousand unit cubes.

use bevy::prelude::*;

/// How far edit rays reach (matches the camera far plane)
pub const RAY_FAR: f32 = 500.0;

/// An axis-aligned box in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Unit cube occupying grid cell `cell`
    pub fn unit_cell(cell: IVec3) -> Self {
        let min = cell.as_vec3();
        Self {
            min,
            max: min + Vec3::ONE,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// A single ray intersection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<T> {
    pub target: T,
    pub distance: f32,
    pub point: Vec3,
    /// Outward normal of the face that was hit
    pub normal: Vec3,
}

/// Something that can be hit-tested with a ray.
pub trait RayQueryable {
    type Target: Copy + PartialEq;

    /// All intersections within `max_distance`, nearest first.
    fn cast_ray(&self, ray: Ray3d, max_distance: f32) -> Vec<RayHit<Self::Target>>;

    /// Nearest intersection accepted by `filter`.
    fn cast_ray_filtered(
        &self,
        ray: Ray3d,
        max_distance: f32,
        filter: impl Fn(Self::Target) -> bool,
    ) -> Option<RayHit<Self::Target>> {
        self.cast_ray(ray, max_distance)
            .into_iter()
            .find(|hit| filter(hit.target))
    }
}

/// Flat collection of hit-testable boxes (linear scan)
#[derive(Debug, Clone)]
pub struct LinearScene<T> {
    members: Vec<(T, Aabb)>,
}

impl<T> Default for LinearScene<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<T> LinearScene<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, target: T, bounds: Aabb) {
        self.members.push((target, bounds));
    }

    pub fn remove(&mut self, target: T)
    where
        T: PartialEq,
    {
        self.members.retain(|(member, _)| *member != target);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T: Copy + PartialEq> RayQueryable for LinearScene<T> {
    type Target = T;

    fn cast_ray(&self, ray: Ray3d, max_distance: f32) -> Vec<RayHit<T>> {
        let mut hits: Vec<RayHit<T>> = self
            .members
            .iter()
            .filter_map(|(target, bounds)| {
                ray_aabb_intersection(ray.origin, *ray.direction, max_distance, bounds).map(
                    |(distance, normal)| RayHit {
                        target: *target,
                        distance,
                        point: ray.origin + *ray.direction * distance,
                        normal,
                    },
                )
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// Slab test. Returns (entry distance, entry face normal) for a ray that
/// enters the box within `max_t`.
///
/// Rays starting inside the box are not reported: the entry point is behind
/// the origin.
pub fn ray_aabb_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    max_t: f32,
    bounds: &Aabb,
) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);

        if dir.abs() < 1e-8 {
            // Parallel to this slab: must already be between the planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (lo - origin) * inv;
        let mut t1 = (hi - origin) * inv;
        // Entering through the min face means the face points toward -axis
        let mut face_sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            face_sign = 1.0;
        }

        if t0 > t_enter {
            t_enter = t0;
            normal = Vec3::ZERO;
            normal[axis] = face_sign;
        }
        t_exit = t_exit.min(t1);

        if t_enter > t_exit {
            return None;
        }
    }

    if t_enter < 0.0 || t_enter > max_t {
        return None;
    }

    Some((t_enter, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray(origin: Vec3, dir: Vec3) -> Ray3d {
        Ray3d::new(origin, Dir3::new(dir).unwrap())
    }

    #[test]
    fn test_hit_front_face() {
        let bounds = Aabb::unit_cell(IVec3::new(0, 0, -3));
        let (t, normal) =
            ray_aabb_intersection(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z, RAY_FAR, &bounds)
                .unwrap();
        assert!((t - 2.0).abs() < 1e-6);
        assert_eq!(normal, Vec3::Z);
    }

    #[test]
    fn test_hit_top_face_from_above() {
        let bounds = Aabb::unit_cell(IVec3::new(2, -1, 2));
        let (t, normal) =
            ray_aabb_intersection(Vec3::new(2.5, 3.0, 2.5), Vec3::NEG_Y, RAY_FAR, &bounds)
                .unwrap();
        assert!((t - 3.0).abs() < 1e-6);
        assert_eq!(normal, Vec3::Y);
    }

    #[test]
    fn test_miss_and_range() {
        let bounds = Aabb::unit_cell(IVec3::new(5, 0, 0));
        assert!(ray_aabb_intersection(Vec3::ZERO, Vec3::NEG_Z, RAY_FAR, &bounds).is_none());
        // Behind the origin
        assert!(ray_aabb_intersection(Vec3::new(7.0, 0.5, 0.5), Vec3::X, RAY_FAR, &bounds)
            .is_none());
        // Out of reach
        assert!(ray_aabb_intersection(Vec3::new(0.0, 0.5, 0.5), Vec3::X, 4.0, &bounds).is_none());
    }

    #[test]
    fn test_origin_inside_is_ignored() {
        let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(1.0));
        assert!(bounds.contains(Vec3::ZERO));
        assert!(ray_aabb_intersection(Vec3::ZERO, Vec3::X, RAY_FAR, &bounds).is_none());
    }

    #[test]
    fn test_scene_hits_sorted_nearest_first() {
        let mut scene = LinearScene::new();
        scene.insert(3u32, Aabb::unit_cell(IVec3::new(0, 0, -8)));
        scene.insert(1u32, Aabb::unit_cell(IVec3::new(0, 0, -2)));
        scene.insert(2u32, Aabb::unit_cell(IVec3::new(0, 0, -5)));
        scene.insert(9u32, Aabb::unit_cell(IVec3::new(4, 0, -5)));
        assert_eq!(scene.len(), 4);

        let hits = scene.cast_ray(ray(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z), RAY_FAR);
        let order: Vec<u32> = hits.iter().map(|h| h.target).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!((hits[0].point.z - -1.0).abs() < 1e-6);

        let skip_first = scene
            .cast_ray_filtered(ray(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z), RAY_FAR, |t| t != 1)
            .unwrap();
        assert_eq!(skip_first.target, 2);

        scene.remove(1);
        let hits = scene.cast_ray(ray(Vec3::new(0.5, 0.5, 0.0), Vec3::NEG_Z), RAY_FAR);
        assert_eq!(hits[0].target, 2);
    }

    #[test]
    fn test_empty_scene() {
        let scene: LinearScene<u32> = LinearScene::new();
        assert!(scene.is_empty());
        assert!(scene.cast_ray(ray(Vec3::ZERO, Vec3::X), RAY_FAR).is_empty());
    }
}
