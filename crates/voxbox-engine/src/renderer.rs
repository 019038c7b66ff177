//! Headless renderer.
//!
//! Keeps a table of live visuals and the latest camera pose, logging all
//! traffic at trace level. Stands in for a real scene graph when the
//! sandbox runs without a window.

use ahash::AHashMap;
use glam::Vec3;
use tracing::{trace, warn};
use voxbox_common::{BlockPos, VisualHandle};
use voxbox_world::{Block, Renderer};

/// What the renderer knows about one visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visual {
    /// Cell the cube is drawn at
    pub pos: BlockPos,
    /// Cube colour (0xRRGGBB)
    pub color: u32,
}

/// Camera position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position
    pub eye: Vec3,
    /// Yaw in radians
    pub yaw: f32,
    /// Pitch in radians
    pub pitch: f32,
}

/// Renderer that records visuals instead of drawing them.
#[derive(Debug, Default)]
pub struct TracingRenderer {
    next_handle: u64,
    visuals: AHashMap<VisualHandle, Visual>,
    camera: Option<CameraPose>,
    created: u64,
    destroyed: u64,
}

impl TracingRenderer {
    /// Creates an empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live visuals.
    #[must_use]
    pub fn live_visuals(&self) -> usize {
        self.visuals.len()
    }

    /// Looks up a live visual.
    #[must_use]
    pub fn visual(&self, handle: VisualHandle) -> Option<&Visual> {
        self.visuals.get(&handle)
    }

    /// Latest camera pose.
    #[must_use]
    pub const fn camera(&self) -> Option<CameraPose> {
        self.camera
    }

    /// Visuals created and destroyed over the renderer's lifetime.
    #[must_use]
    pub const fn totals(&self) -> (u64, u64) {
        (self.created, self.destroyed)
    }
}

impl Renderer for TracingRenderer {
    fn add_visual(&mut self, block: &Block) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle::from_raw(self.next_handle);
        let visual = Visual {
            pos: block.pos,
            color: block.block_type.color(),
        };
        trace!("add visual {:?} {:06x} at {}", handle, visual.color, visual.pos);
        self.visuals.insert(handle, visual);
        self.created += 1;
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        match self.visuals.remove(&handle) {
            Some(visual) => {
                trace!("remove visual {:?} at {}", handle, visual.pos);
                self.destroyed += 1;
            },
            None => warn!("remove of unknown visual {:?}", handle),
        }
    }

    fn set_camera_pose(&mut self, eye: Vec3, yaw: f32, pitch: f32) {
        trace!("camera eye={eye:?} yaw={yaw:.3} pitch={pitch:.3}");
        self.camera = Some(CameraPose { eye, yaw, pitch });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbox_world::{BlockType, WorldStore};

    #[test]
    fn test_visual_table_tracks_store() {
        let mut store = WorldStore::new();
        let mut renderer = TracingRenderer::new();

        let grass = store.insert(
            Block::new(BlockPos::new(0, 0, 0), BlockType::Grass),
            &mut renderer,
        );
        store.insert(Block::new(BlockPos::new(0, 1, 0), BlockType::Unknown), &mut renderer);
        assert_eq!(renderer.live_visuals(), 2);

        let handle = store.get(grass).expect("stored").visual();
        assert_eq!(
            renderer.visual(handle),
            Some(&Visual {
                pos: BlockPos::new(0, 0, 0),
                color: 0x4caf50,
            })
        );

        store.remove(grass, &mut renderer);
        assert_eq!(renderer.visual(handle), None);
        assert_eq!(renderer.live_visuals(), 1);
        assert_eq!(renderer.totals(), (2, 1));
    }

    #[test]
    fn test_unknown_type_uses_fallback_color() {
        let mut renderer = TracingRenderer::new();
        let handle = renderer.add_visual(&Block::new(BlockPos::ORIGIN, BlockType::Unknown));
        assert_eq!(renderer.visual(handle).map(|v| v.color), Some(0xffffff));
    }

    #[test]
    fn test_double_remove_is_harmless() {
        let mut renderer = TracingRenderer::new();
        let handle = renderer.add_visual(&Block::new(BlockPos::ORIGIN, BlockType::Stone));
        renderer.remove_visual(handle);
        renderer.remove_visual(handle);
        assert_eq!(renderer.live_visuals(), 0);
        assert_eq!(renderer.totals(), (1, 1));
    }

    #[test]
    fn test_camera_pose_recorded() {
        let mut renderer = TracingRenderer::new();
        assert_eq!(renderer.camera(), None);
        renderer.set_camera_pose(Vec3::ONE, 0.5, -0.25);
        assert_eq!(
            renderer.camera(),
            Some(CameraPose {
                eye: Vec3::ONE,
                yaw: 0.5,
                pitch: -0.25,
            })
        );
    }
}
