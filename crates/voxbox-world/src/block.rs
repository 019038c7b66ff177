//! Block kinds and placed blocks.

use serde::{Deserialize, Serialize};
use voxbox_common::BlockPos;

use crate::aabb::Aabb;

/// Kind of a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    /// Grass (column top)
    Grass,
    /// Dirt (just below the surface)
    Dirt,
    /// Stone (deep layers)
    Stone,
    /// Wood (tree trunks)
    Wood,
    /// Leaves (tree canopies)
    Leaves,
    /// Unrecognised kind, drawn with the fallback appearance
    Unknown,
}

impl BlockType {
    /// Every known kind, in hotbar order.
    pub const ALL: [Self; 5] = [
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Wood,
        Self::Leaves,
    ];

    /// Colour used for kinds without an entry in the appearance table.
    pub const FALLBACK_COLOR: u32 = 0x00ff_ffff;

    /// Resolves a kind from its lowercase name.
    ///
    /// Unknown names never fail; they map to [`BlockType::Unknown`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grass" => Self::Grass,
            "dirt" => Self::Dirt,
            "stone" => Self::Stone,
            "wood" => Self::Wood,
            "leaves" => Self::Leaves,
            _ => Self::Unknown,
        }
    }

    /// Lowercase name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::Wood => "wood",
            Self::Leaves => "leaves",
            Self::Unknown => "unknown",
        }
    }

    /// Packed `0xRRGGBB` colour from the appearance table.
    #[must_use]
    pub const fn color(self) -> u32 {
        match self {
            Self::Grass => 0x004c_af50,
            Self::Dirt | Self::Wood => 0x008b_5a2b,
            Self::Stone => 0x0080_8080,
            Self::Leaves => 0x002e_7d32,
            Self::Unknown => Self::FALLBACK_COLOR,
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BlockType> for String {
    fn from(kind: BlockType) -> Self {
        kind.name().to_owned()
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit cube at an integer grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    /// Grid cell (the cube's centre)
    pub pos: BlockPos,
    /// Kind of block
    pub block_type: BlockType,
}

impl Block {
    /// Creates a new block.
    #[must_use]
    pub const fn new(pos: BlockPos, block_type: BlockType) -> Self {
        Self { pos, block_type }
    }

    /// World-space bounds of the block's unit cube.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::unit_cube(self.pos)
    }

    /// Y coordinate of the cube's top face.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.pos.y as f32 + 0.5
    }

    /// Y coordinate of the cube's bottom face.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.pos.y as f32 - 0.5
    }
}
