//! # voxbox World
//!
//! World management for voxbox.
//!
//! This crate handles:
//! - Block kinds and their appearance table
//! - The world store (owning block list paired with renderer visuals)
//! - Procedural generation of terrain and trees
//! - Ray and box queries against placed blocks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod aabb;
pub mod block;
pub mod generation;
pub mod raycast;
pub mod render;
pub mod store;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aabb::*;
    pub use crate::block::*;
    pub use crate::generation::*;
    pub use crate::raycast::*;
    pub use crate::render::*;
    pub use crate::store::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use voxbox_common::BlockPos;

    #[test]
    fn test_generated_world_is_pickable() {
        let mut gen = WorldGenerator::with_seed(3).expect("valid config");
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();
        gen.generate(&mut store, &mut renderer);
        assert_eq!(renderer.live_visuals(), store.len());

        // Looking straight down from high above the origin hits the column top
        let top = store.column_top(0, 0).expect("origin column exists");
        let ray = Ray::new(Vec3::new(0.0, 100.0, 0.0), Vec3::NEG_Y);
        let hit = store.raycast(&SlabCaster, &ray, f32::INFINITY).expect("should hit");
        let block = store.get(hit.id).expect("hit block is stored").block();
        assert!(block.pos.y >= top);
        assert_eq!(hit.normal, glam::IVec3::Y);
    }

    #[test]
    fn test_block_pos_reexport() {
        let block = Block::new(BlockPos::new(1, 2, 3), BlockType::Dirt);
        assert_eq!(block.aabb().center(), Vec3::new(1.0, 2.0, 3.0));
    }
}
