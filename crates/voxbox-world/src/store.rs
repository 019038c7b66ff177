//! The world store: owning collection of placed blocks.
//!
//! Blocks are kept in a flat list and every query is a linear scan. Each
//! entry pairs the block with the visual handle its renderer returned, so a
//! block can never exist without a visual and a visual never outlives its
//! block.

use tracing::trace;
use voxbox_common::{BlockId, BlockPos, VisualHandle};

use crate::aabb::Aabb;
use crate::block::Block;
use crate::raycast::{Ray, RayCaster, RayHit};
use crate::render::Renderer;

/// A block together with its store ID and renderer handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredBlock {
    id: BlockId,
    block: Block,
    visual: VisualHandle,
}

impl StoredBlock {
    /// Store-assigned ID.
    #[must_use]
    pub const fn id(&self) -> BlockId {
        self.id
    }

    /// The block itself.
    #[must_use]
    pub const fn block(&self) -> &Block {
        &self.block
    }

    /// Renderer handle of the block's visual.
    #[must_use]
    pub const fn visual(&self) -> VisualHandle {
        self.visual
    }
}

/// Unordered collection of all placed blocks.
#[derive(Debug, Default)]
pub struct WorldStore {
    blocks: Vec<StoredBlock>,
    next_id: u64,
}

impl WorldStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blocks (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Checks whether the store holds no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over all stored blocks in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredBlock> + '_ {
        self.blocks.iter()
    }

    /// Stores a block and creates its visual.
    ///
    /// Occupancy is not checked: a cell may hold several blocks.
    pub fn insert<R: Renderer + ?Sized>(&mut self, block: Block, renderer: &mut R) -> BlockId {
        self.next_id += 1;
        let id = BlockId::from_raw(self.next_id);
        let visual = renderer.add_visual(&block);
        trace!("insert {} {} at {}", id, block.block_type, block.pos);
        self.blocks.push(StoredBlock { id, block, visual });
        id
    }

    /// Removes a block and destroys its visual.
    ///
    /// Returns `None` when no block has this ID.
    pub fn remove<R: Renderer + ?Sized>(&mut self, id: BlockId, renderer: &mut R) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        let removed = self.blocks.remove(index);
        renderer.remove_visual(removed.visual);
        trace!("remove {} {} at {}", id, removed.block.block_type, removed.block.pos);
        Some(removed.block)
    }

    /// Removes every block, destroying all visuals.
    pub fn clear<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for stored in self.blocks.drain(..) {
            renderer.remove_visual(stored.visual);
        }
    }

    /// Looks up a block by ID.
    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&StoredBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// All blocks stored in the given cell.
    pub fn blocks_at(&self, pos: BlockPos) -> impl Iterator<Item = &StoredBlock> + '_ {
        self.blocks.iter().filter(move |b| b.block.pos == pos)
    }

    /// First block (in scan order) whose cube overlaps `aabb`.
    #[must_use]
    pub fn first_intersecting(&self, aabb: &Aabb) -> Option<&StoredBlock> {
        self.blocks.iter().find(|b| b.block.aabb().overlaps(aabb))
    }

    /// Every block whose cube overlaps `aabb`.
    pub fn intersecting<'a>(&'a self, aabb: &'a Aabb) -> impl Iterator<Item = &'a StoredBlock> + 'a {
        self.blocks.iter().filter(move |b| b.block.aabb().overlaps(aabb))
    }

    /// Checks whether any block overlaps `aabb`.
    #[must_use]
    pub fn any_intersecting(&self, aabb: &Aabb) -> bool {
        self.first_intersecting(aabb).is_some()
    }

    /// Highest block Y in the column `(x, z)`.
    #[must_use]
    pub fn column_top(&self, x: i32, z: i32) -> Option<i32> {
        self.blocks
            .iter()
            .filter(|b| b.block.pos.in_column(x, z))
            .map(|b| b.block.pos.y)
            .max()
    }

    /// Casts a ray against every block's cube and returns the nearest hit.
    #[must_use]
    pub fn raycast<C: RayCaster + ?Sized>(
        &self,
        caster: &C,
        ray: &Ray,
        max_distance: f32,
    ) -> Option<RayHit> {
        caster.cast(
            ray,
            &mut self.blocks.iter().map(|b| (b.id, b.block.aabb())),
            max_distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::raycast::SlabCaster;
    use crate::render::NullRenderer;
    use glam::Vec3;

    fn block(x: i32, y: i32, z: i32) -> Block {
        Block::new(BlockPos::new(x, y, z), BlockType::Stone)
    }

    #[test]
    fn test_insert_remove_keeps_visuals_paired() {
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();

        let a = store.insert(block(0, 0, 0), &mut renderer);
        let b = store.insert(block(1, 0, 0), &mut renderer);
        assert_eq!(store.len(), 2);
        assert_eq!(renderer.live_visuals(), 2);
        assert_ne!(a, b);

        assert_eq!(store.remove(a, &mut renderer), Some(block(0, 0, 0)));
        assert_eq!(store.len(), 1);
        assert_eq!(renderer.live_visuals(), 1);

        // Second removal of the same ID is a no-op
        assert_eq!(store.remove(a, &mut renderer), None);
        assert_eq!(renderer.live_visuals(), 1);

        store.clear(&mut renderer);
        assert!(store.is_empty());
        assert_eq!(renderer.live_visuals(), 0);
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();

        store.insert(block(2, 2, 2), &mut renderer);
        store.insert(block(2, 2, 2), &mut renderer);

        assert_eq!(store.blocks_at(BlockPos::new(2, 2, 2)).count(), 2);
        assert_eq!(renderer.live_visuals(), 2);
    }

    #[test]
    fn test_intersection_queries() {
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();
        let id = store.insert(block(0, 0, 0), &mut renderer);
        store.insert(block(5, 0, 0), &mut renderer);

        let probe = Aabb::from_center(Vec3::new(0.2, 0.2, 0.0), Vec3::splat(0.1));
        assert_eq!(store.first_intersecting(&probe).map(StoredBlock::id), Some(id));
        assert_eq!(store.intersecting(&probe).count(), 1);

        let far = Aabb::from_center(Vec3::new(2.5, 0.0, 0.0), Vec3::splat(0.4));
        assert!(!store.any_intersecting(&far));
    }

    #[test]
    fn test_column_top() {
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();
        for y in 0..4 {
            store.insert(block(0, y, 0), &mut renderer);
        }
        store.insert(block(1, 9, 0), &mut renderer);

        assert_eq!(store.column_top(0, 0), Some(3));
        assert_eq!(store.column_top(3, 3), None);
    }

    #[test]
    fn test_raycast_nearest() {
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();
        let far = store.insert(block(0, 0, -5), &mut renderer);
        let near = store.insert(block(0, 0, -2), &mut renderer);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = store.raycast(&SlabCaster, &ray, f32::INFINITY);
        assert_eq!(hit.map(|h| h.id), Some(near));

        store.remove(near, &mut renderer);
        let hit = store.raycast(&SlabCaster, &ray, f32::INFINITY);
        assert_eq!(hit.map(|h| h.id), Some(far));
    }
}
