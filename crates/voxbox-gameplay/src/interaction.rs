//! Block interaction: breaking and placing blocks along the camera ray.

use serde::{Deserialize, Serialize};
use tracing::debug;
use voxbox_common::{BlockId, BlockPos};
use voxbox_world::{Block, BlockType, RayCaster, RayHit, Renderer, SlabCaster, WorldStore};

use crate::hotbar::Hotbar;
use crate::player::Player;

/// Interaction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Block type names shown in the hotbar, in slot order
    pub hotbar: Vec<String>,
    /// Maximum ray distance (None = unlimited)
    pub reach: Option<f32>,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hotbar: BlockType::ALL.iter().map(|t| t.name().to_string()).collect(),
            reach: None,
        }
    }
}

impl InteractionConfig {
    /// Builds the hotbar described by this configuration.
    #[must_use]
    pub fn build_hotbar(&self) -> Hotbar {
        Hotbar::from_names(&self.hotbar)
    }
}

/// Result of a break or place request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// A block was removed
    Broken {
        /// Store ID of the removed block
        id: BlockId,
        /// Cell it occupied
        pos: BlockPos,
        /// Its type
        kind: BlockType,
    },
    /// A block was added
    Placed {
        /// Store ID of the new block
        id: BlockId,
        /// Cell it occupies
        pos: BlockPos,
        /// Its type
        kind: BlockType,
    },
    /// The camera ray hit nothing in reach
    Missed,
}

/// Breaks and places blocks under the player's crosshair.
#[derive(Debug, Clone)]
pub struct BlockInteractor<C = SlabCaster> {
    caster: C,
    reach: Option<f32>,
}

impl Default for BlockInteractor {
    fn default() -> Self {
        Self::new(&InteractionConfig::default())
    }
}

impl BlockInteractor {
    /// Creates an interactor using the slab ray caster.
    #[must_use]
    pub fn new(config: &InteractionConfig) -> Self {
        Self::with_caster(config, SlabCaster)
    }
}

impl<C: RayCaster> BlockInteractor<C> {
    /// Creates an interactor with a custom ray caster.
    #[must_use]
    pub fn with_caster(config: &InteractionConfig, caster: C) -> Self {
        Self {
            caster,
            reach: config.reach,
        }
    }

    /// Maximum ray distance.
    #[must_use]
    pub const fn reach(&self) -> Option<f32> {
        self.reach
    }

    /// Nearest block under the crosshair.
    #[must_use]
    pub fn target(&self, store: &WorldStore, player: &Player) -> Option<RayHit> {
        let max_distance = self.reach.unwrap_or(f32::INFINITY);
        store.raycast(&self.caster, &player.view_ray(), max_distance)
    }

    /// Removes the targeted block.
    pub fn break_block<R: Renderer + ?Sized>(
        &self,
        store: &mut WorldStore,
        renderer: &mut R,
        player: &Player,
    ) -> InteractionOutcome {
        let Some(hit) = self.target(store, player) else {
            debug!("Break missed");
            return InteractionOutcome::Missed;
        };
        let Some(block) = store.remove(hit.id, renderer) else {
            return InteractionOutcome::Missed;
        };
        debug!(
            "Broke {} {} at {} (hit {:.2?} at distance {:.2})",
            hit.id, block.block_type, block.pos, hit.point, hit.distance
        );
        InteractionOutcome::Broken {
            id: hit.id,
            pos: block.pos,
            kind: block.block_type,
        }
    }

    /// Places a block of `kind` against the targeted face.
    ///
    /// The new cell is not checked for existing blocks or for the player.
    pub fn place_block<R: Renderer + ?Sized>(
        &self,
        store: &mut WorldStore,
        renderer: &mut R,
        player: &Player,
        kind: BlockType,
    ) -> InteractionOutcome {
        let Some(hit) = self.target(store, player) else {
            debug!("Place missed");
            return InteractionOutcome::Missed;
        };
        let Some(target) = store.get(hit.id) else {
            return InteractionOutcome::Missed;
        };
        let pos = target.block().pos.offset(hit.normal);
        let id = store.insert(Block::new(pos, kind), renderer);
        debug!("Placed {} {} at {}", id, kind, pos);
        InteractionOutcome::Placed { id, pos, kind }
    }
}
