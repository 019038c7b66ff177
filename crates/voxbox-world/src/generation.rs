//! Procedural world generation.
//!
//! A single pass over a `width × depth` grid of columns: each column gets a
//! noise-driven height and a grass/dirt/stone profile, and occasionally a
//! tree with a small spherical canopy.

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use voxbox_common::{BlockPos, WorldError};

use crate::block::{Block, BlockType};
use crate::render::Renderer;
use crate::store::WorldStore;

/// Canopy radius in cells.
const CANOPY_RADIUS: i32 = 2;

/// Grass plus dirt layers at the top of every column.
const SOIL_DEPTH: u32 = 3;

/// Inclusive range of tree trunk heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeHeightRange {
    /// Shortest trunk
    pub min: u32,
    /// Tallest trunk
    pub max: u32,
}

impl Default for TreeHeightRange {
    fn default() -> Self {
        Self { min: 3, max: 5 }
    }
}

/// World generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// World seed (None = random)
    pub seed: Option<u64>,
    /// Columns along X
    pub width: u32,
    /// Columns along Z
    pub depth: u32,
    /// Tallest possible column
    pub max_height: u32,
    /// Chance per column of growing a tree
    pub tree_probability: f64,
    /// Trunk height range
    pub tree_height_range: TreeHeightRange,
    /// Noise frequency divisor (larger = smoother)
    pub noise_scale: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            width: 40,
            depth: 40,
            max_height: 8,
            tree_probability: 0.04,
            tree_height_range: TreeHeightRange::default(),
            noise_scale: 10.0,
        }
    }
}

impl GeneratorConfig {
    /// Checks that generation over this configuration is well defined.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.width == 0 || self.depth == 0 {
            return Err(WorldError::EmptyWorld {
                width: self.width,
                depth: self.depth,
            });
        }
        if self.max_height < 1 {
            return Err(WorldError::InvalidMaxHeight(self.max_height));
        }
        let range = self.tree_height_range;
        if range.min > range.max {
            return Err(WorldError::InvalidTreeRange {
                min: range.min,
                max: range.max,
            });
        }
        if !(0.0..=1.0).contains(&self.tree_probability) {
            return Err(WorldError::InvalidProbability(self.tree_probability));
        }
        if self.noise_scale.is_nan() || self.noise_scale <= 0.0 {
            return Err(WorldError::InvalidNoiseScale(self.noise_scale));
        }
        Ok(())
    }

    /// Offset that maps column index 0 to world X.
    #[must_use]
    pub fn offset_x(&self) -> i32 {
        -((self.width / 2) as i32)
    }

    /// Offset that maps column index 0 to world Z.
    #[must_use]
    pub fn offset_z(&self) -> i32 {
        -((self.depth / 2) as i32)
    }
}

/// Counts reported after a generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Columns visited
    pub columns: u32,
    /// Blocks inserted (terrain, trunks and canopies)
    pub blocks: u32,
    /// Trees planted
    pub trees: u32,
}

/// Kind of the layer at `y` in a column of height `height`.
#[must_use]
pub fn layer_type(y: u32, height: u32) -> BlockType {
    if y + 1 == height {
        BlockType::Grass
    } else if y + SOIL_DEPTH >= height {
        BlockType::Dirt
    } else {
        BlockType::Stone
    }
}

/// Procedural world generator.
pub struct WorldGenerator<N = Perlin> {
    /// Configuration
    config: GeneratorConfig,
    /// Seed actually in use
    seed: u64,
    /// Height-field noise
    noise: N,
    /// Tree decoration randomness
    rng: fastrand::Rng,
}

impl WorldGenerator<Perlin> {
    /// Creates a generator using Perlin noise seeded from the config.
    ///
    /// Without a configured seed a random one is drawn.
    pub fn new(config: GeneratorConfig) -> Result<Self, WorldError> {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        Self::build(config, seed, Perlin::new(seed as u32))
    }

    /// Creates a generator with default config and the given seed.
    pub fn with_seed(seed: u64) -> Result<Self, WorldError> {
        Self::new(GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }
}

impl<N: NoiseFn<f64, 2>> WorldGenerator<N> {
    /// Creates a generator with a caller-supplied noise source.
    pub fn with_noise(config: GeneratorConfig, noise: N) -> Result<Self, WorldError> {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        Self::build(config, seed, noise)
    }

    fn build(config: GeneratorConfig, seed: u64, noise: N) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self {
            config,
            seed,
            noise,
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    /// Returns the generator configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Seed in use (drawn at construction when none was configured).
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Height of the column at grid index `(ix, iz)`, in `1..=max_height`.
    #[must_use]
    pub fn column_height(&self, ix: u32, iz: u32) -> u32 {
        let scale = self.config.noise_scale;
        let sample = self.noise.get([f64::from(ix) / scale, f64::from(iz) / scale]);
        let normalized = (sample.clamp(-1.0, 1.0) + 1.0) / 2.0;
        let span = f64::from(self.config.max_height - 1);
        ((normalized * span).floor() as u32 + 1).max(1)
    }

    /// Fills `store` with terrain and trees.
    pub fn generate<R: Renderer + ?Sized>(
        &mut self,
        store: &mut WorldStore,
        renderer: &mut R,
    ) -> GenerationSummary {
        let offset_x = self.config.offset_x();
        let offset_z = self.config.offset_z();
        let mut summary = GenerationSummary::default();

        info!(
            "Generating {}x{} world (seed {}, max height {})",
            self.config.width, self.config.depth, self.seed, self.config.max_height
        );

        for ix in 0..self.config.width {
            for iz in 0..self.config.depth {
                let x = ix as i32 + offset_x;
                let z = iz as i32 + offset_z;
                let height = self.column_height(ix, iz);

                for y in 0..height {
                    let block = Block::new(BlockPos::new(x, y as i32, z), layer_type(y, height));
                    store.insert(block, renderer);
                    summary.blocks += 1;
                }
                summary.columns += 1;

                if self.rng.f64() < self.config.tree_probability {
                    summary.blocks += self.plant_tree(store, renderer, x, height as i32, z);
                    summary.trees += 1;
                }
            }
        }

        info!(
            "Generated {} blocks over {} columns ({} trees)",
            summary.blocks, summary.columns, summary.trees
        );
        summary
    }

    /// Grows a trunk from `base_y` upward and caps it with a canopy.
    ///
    /// Returns the number of blocks inserted.
    fn plant_tree<R: Renderer + ?Sized>(
        &mut self,
        store: &mut WorldStore,
        renderer: &mut R,
        x: i32,
        base_y: i32,
        z: i32,
    ) -> u32 {
        let range = self.config.tree_height_range;
        let trunk = self.rng.u32(range.min..=range.max) as i32;
        let mut inserted = 0;

        for y in base_y..base_y + trunk {
            store.insert(Block::new(BlockPos::new(x, y, z), BlockType::Wood), renderer);
            inserted += 1;
        }

        let crown = base_y + trunk;
        for dx in -CANOPY_RADIUS..=CANOPY_RADIUS {
            for dz in -CANOPY_RADIUS..=CANOPY_RADIUS {
                for dy in 0..=1 {
                    if dx * dx + dz * dz + dy * dy <= CANOPY_RADIUS * CANOPY_RADIUS {
                        let pos = BlockPos::new(x + dx, crown + dy, z + dz);
                        store.insert(Block::new(pos, BlockType::Leaves), renderer);
                        inserted += 1;
                    }
                }
            }
        }

        debug!("Planted tree at ({x}, {base_y}, {z}) with trunk {trunk}");
        inserted
    }
}

/// Spawn height above column (0, 0) when it is empty.
pub const DEFAULT_SPAWN_TOP: i32 = 5;

/// Y of the highest block whose rounded position lies in column (0, 0),
/// or [`DEFAULT_SPAWN_TOP`] when there is none.
#[must_use]
pub fn spawn_top(store: &WorldStore) -> i32 {
    store.column_top(0, 0).unwrap_or(DEFAULT_SPAWN_TOP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;
    use noise::Constant;
    use proptest::prelude::*;

    fn flat_config(width: u32, depth: u32, max_height: u32) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(7),
            width,
            depth,
            max_height,
            tree_probability: 0.0,
            ..Default::default()
        }
    }

    fn sorted_blocks(store: &WorldStore) -> Vec<(i32, i32, i32, BlockType)> {
        let mut blocks: Vec<_> = store
            .iter()
            .map(|b| {
                let p = b.block().pos;
                (p.x, p.y, p.z, b.block().block_type)
            })
            .collect();
        blocks.sort_by_key(|&(x, y, z, _)| (x, y, z));
        blocks
    }

    #[test]
    fn test_single_column_scenario() {
        let mut gen = WorldGenerator::with_noise(flat_config(1, 1, 8), Constant::new(0.0))
            .expect("valid config");
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();

        let summary = gen.generate(&mut store, &mut renderer);

        assert_eq!(summary.blocks, 4);
        assert_eq!(
            sorted_blocks(&store),
            vec![
                (0, 0, 0, BlockType::Stone),
                (0, 1, 0, BlockType::Dirt),
                (0, 2, 0, BlockType::Dirt),
                (0, 3, 0, BlockType::Grass),
            ]
        );
        assert_eq!(renderer.live_visuals(), 4);
    }

    #[test]
    fn test_layer_classification() {
        assert_eq!(layer_type(0, 1), BlockType::Grass);
        assert_eq!(layer_type(0, 2), BlockType::Dirt);
        assert_eq!(layer_type(1, 2), BlockType::Grass);
        assert_eq!(layer_type(0, 5), BlockType::Stone);
        assert_eq!(layer_type(1, 5), BlockType::Stone);
        assert_eq!(layer_type(2, 5), BlockType::Dirt);
        assert_eq!(layer_type(3, 5), BlockType::Dirt);
        assert_eq!(layer_type(4, 5), BlockType::Grass);
    }

    #[test]
    fn test_noise_extremes_stay_in_bounds() {
        let low = WorldGenerator::with_noise(flat_config(1, 1, 8), Constant::new(-1.0))
            .expect("valid config");
        assert_eq!(low.column_height(0, 0), 1);

        let high = WorldGenerator::with_noise(flat_config(1, 1, 8), Constant::new(1.0))
            .expect("valid config");
        assert_eq!(high.column_height(0, 0), 8);

        let beyond = WorldGenerator::with_noise(flat_config(1, 1, 8), Constant::new(3.0))
            .expect("valid config");
        assert_eq!(beyond.column_height(0, 0), 8);
    }

    #[test]
    fn test_centering_offset() {
        let mut gen = WorldGenerator::with_noise(flat_config(4, 3, 1), Constant::new(0.0))
            .expect("valid config");
        let mut store = WorldStore::new();
        gen.generate(&mut store, &mut NullRenderer::new());

        let xs: Vec<i32> = store.iter().map(|b| b.block().pos.x).collect();
        let zs: Vec<i32> = store.iter().map(|b| b.block().pos.z).collect();
        assert_eq!(xs.iter().min(), Some(&-2));
        assert_eq!(xs.iter().max(), Some(&1));
        assert_eq!(zs.iter().min(), Some(&-1));
        assert_eq!(zs.iter().max(), Some(&1));
    }

    #[test]
    fn test_tree_shape() {
        let config = GeneratorConfig {
            tree_probability: 1.0,
            tree_height_range: TreeHeightRange { min: 4, max: 4 },
            ..flat_config(1, 1, 8)
        };
        let mut gen = WorldGenerator::with_noise(config, Constant::new(0.0)).expect("valid config");
        let mut store = WorldStore::new();
        let summary = gen.generate(&mut store, &mut NullRenderer::new());

        assert_eq!(summary.trees, 1);
        let wood: Vec<i32> = store
            .iter()
            .filter(|b| b.block().block_type == BlockType::Wood)
            .map(|b| b.block().pos.y)
            .collect();
        assert_eq!(wood, vec![4, 5, 6, 7]);

        // Radius-2 disc has 13 cells, the layer above loses the 4 corners at distance sqrt(5)
        let leaves_at = |y: i32| {
            store
                .iter()
                .filter(|b| b.block().block_type == BlockType::Leaves && b.block().pos.y == y)
                .count()
        };
        assert_eq!(leaves_at(8), 13);
        assert_eq!(leaves_at(9), 9);
        assert_eq!(summary.blocks, 4 + 4 + 13 + 9);
    }

    #[test]
    fn test_generation_deterministic() {
        let config = GeneratorConfig {
            seed: Some(42),
            width: 12,
            depth: 12,
            tree_probability: 0.2,
            ..Default::default()
        };
        let mut a = WorldGenerator::new(config.clone()).expect("valid config");
        let mut b = WorldGenerator::new(config).expect("valid config");
        let (mut store_a, mut store_b) = (WorldStore::new(), WorldStore::new());
        a.generate(&mut store_a, &mut NullRenderer::new());
        b.generate(&mut store_b, &mut NullRenderer::new());

        assert_eq!(sorted_blocks(&store_a), sorted_blocks(&store_b));
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let bad = [
            GeneratorConfig { width: 0, ..Default::default() },
            GeneratorConfig { max_height: 0, ..Default::default() },
            GeneratorConfig {
                tree_height_range: TreeHeightRange { min: 6, max: 2 },
                ..Default::default()
            },
            GeneratorConfig { tree_probability: 1.5, ..Default::default() },
            GeneratorConfig { noise_scale: 0.0, ..Default::default() },
        ];
        for config in bad {
            assert!(WorldGenerator::new(config).is_err());
        }
    }

    #[test]
    fn test_spawn_top_fallback() {
        let mut store = WorldStore::new();
        assert_eq!(spawn_top(&store), DEFAULT_SPAWN_TOP);

        let mut renderer = NullRenderer::new();
        store.insert(Block::new(BlockPos::new(0, 2, 0), BlockType::Grass), &mut renderer);
        assert_eq!(spawn_top(&store), 2);
    }

    proptest! {
        #[test]
        fn prop_column_heights_in_bounds(seed in any::<u32>(), max_height in 1u32..32) {
            let config = GeneratorConfig {
                seed: Some(u64::from(seed)),
                width: 8,
                depth: 8,
                max_height,
                tree_probability: 0.0,
                ..Default::default()
            };
            let mut gen = WorldGenerator::new(config).expect("valid config");
            let mut store = WorldStore::new();
            gen.generate(&mut store, &mut NullRenderer::new());

            for x in -4..4 {
                for z in -4..4 {
                    let column: Vec<_> = store.iter().filter(|b| b.block().pos.in_column(x, z)).collect();
                    let height = column.len() as u32;
                    prop_assert!((1..=max_height).contains(&height));
                    for stored in column {
                        let y = stored.block().pos.y as u32;
                        prop_assert_eq!(stored.block().block_type, layer_type(y, height));
                    }
                }
            }
        }
    }
}
