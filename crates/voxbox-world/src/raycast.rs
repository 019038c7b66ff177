//! Ray–box intersection for block picking.

use glam::{IVec3, Vec3};
use voxbox_common::BlockId;

use crate::aabb::Aabb;

/// Direction components smaller than this are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction (zero if constructed from a zero vector)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray enters a single box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxHit {
    /// Distance from the ray origin to the entry point
    pub distance: f32,
    /// Outward normal of the entered face
    pub normal: IVec3,
}

/// Nearest block hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Block that was hit
    pub id: BlockId,
    /// Distance from the ray origin
    pub distance: f32,
    /// Outward unit normal of the entered face
    pub normal: IVec3,
    /// World-space entry point
    pub point: Vec3,
}

/// Ray–box intersection capability.
pub trait RayCaster {
    /// Intersects a ray with one box.
    ///
    /// Boxes containing the origin are not hit: a ray only hits faces it
    /// enters from outside.
    fn intersect(&self, ray: &Ray, aabb: &Aabb) -> Option<BoxHit>;

    /// Returns the nearest hit among `candidates` within `max_distance`.
    ///
    /// On equal distances the earlier candidate wins.
    fn cast(
        &self,
        ray: &Ray,
        candidates: &mut dyn Iterator<Item = (BlockId, Aabb)>,
        max_distance: f32,
    ) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for (id, aabb) in candidates {
            let Some(hit) = self.intersect(ray, &aabb) else {
                continue;
            };
            if hit.distance > max_distance {
                continue;
            }
            if nearest.map_or(true, |n| hit.distance < n.distance) {
                nearest = Some(RayHit {
                    id,
                    distance: hit.distance,
                    normal: hit.normal,
                    point: ray.at(hit.distance),
                });
            }
        }
        nearest
    }
}

/// Slab-method ray caster.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlabCaster;

impl RayCaster for SlabCaster {
    fn intersect(&self, ray: &Ray, aabb: &Aabb) -> Option<BoxHit> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut entry_axis = None;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (min, max) = (aabb.min[axis], aabb.max[axis]);

            if dir.abs() < PARALLEL_EPSILON {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let t1 = (min - origin) * inv;
            let t2 = (max - origin) * inv;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };

            if near > t_near {
                t_near = near;
                entry_axis = Some(axis);
            }
            t_far = t_far.min(far);
            if t_near > t_far {
                return None;
            }
        }

        let axis = entry_axis?;
        if t_near < 0.0 {
            return None;
        }

        let mut normal = IVec3::ZERO;
        normal[axis] = if ray.direction[axis] > 0.0 { -1 } else { 1 };
        Some(BoxHit {
            distance: t_near,
            normal,
        })
    }
}
