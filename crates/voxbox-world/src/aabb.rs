//! Axis-aligned bounding boxes.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxbox_common::BlockPos;

/// Axis-aligned bounding box for collision detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from center and half-extents.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// The unit cube occupied by the block at `pos`.
    #[must_use]
    pub fn unit_cube(pos: BlockPos) -> Self {
        Self::from_center(pos.center(), Vec3::splat(0.5))
    }

    /// Returns the center of the AABB.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Checks if this AABB overlaps with another.
    ///
    /// Boxes that only share a face do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Returns the AABB translated by a vector.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ONE)
    }
}
