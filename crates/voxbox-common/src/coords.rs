//! Grid coordinate types for block positions.

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Integer grid position of a block.
///
/// A block at `p` fills the unit cube centred on `p`, i.e. `[p - 0.5, p + 0.5]`
/// on every axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Pod, Zeroable,
)]
#[repr(C)]
pub struct BlockPos {
    /// X coordinate
    pub x: i32,
    /// Y coordinate (up)
    pub y: i32,
    /// Z coordinate
    pub z: i32,
}

impl BlockPos {
    /// Grid origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Creates a new block position.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Rounds a continuous world position to the nearest grid cell.
    #[must_use]
    pub fn from_world(position: Vec3) -> Self {
        Self {
            x: position.x.round() as i32,
            y: position.y.round() as i32,
            z: position.z.round() as i32,
        }
    }

    /// Centre of the cell in world space.
    #[must_use]
    pub fn center(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Returns this position shifted by `offset` cells.
    #[must_use]
    pub const fn offset(self, offset: IVec3) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z + offset.z,
        }
    }

    /// Checks whether this cell lies in the vertical column `(x, z)`.
    #[must_use]
    pub const fn in_column(self, x: i32, z: i32) -> bool {
        self.x == x && self.z == z
    }
}

impl From<IVec3> for BlockPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<BlockPos> for IVec3 {
    fn from(p: BlockPos) -> Self {
        IVec3::new(p.x, p.y, p.z)
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
