//! Renderer capability.
//!
//! The world store owns every block; a renderer only holds one visual per
//! block and is told about each insertion and removal.

use glam::Vec3;
use voxbox_common::VisualHandle;

use crate::block::Block;

/// Scene-side counterpart of the block store.
pub trait Renderer {
    /// Creates a visual for a newly stored block.
    fn add_visual(&mut self, block: &Block) -> VisualHandle;

    /// Destroys the visual of a removed block.
    fn remove_visual(&mut self, handle: VisualHandle);

    /// Moves the camera to the given eye position and orientation.
    fn set_camera_pose(&mut self, eye: Vec3, yaw: f32, pitch: f32) {
        let _ = (eye, yaw, pitch);
    }
}

/// Renderer that draws nothing and only counts visuals.
#[derive(Debug, Default)]
pub struct NullRenderer {
    /// Next raw handle value
    next_handle: u64,
    /// Visuals currently alive
    live: usize,
    /// Last camera pose (eye, yaw, pitch)
    camera: Option<(Vec3, f32, f32)>,
}

impl NullRenderer {
    /// Creates a new null renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visuals created and not yet removed.
    #[must_use]
    pub const fn live_visuals(&self) -> usize {
        self.live
    }

    /// Last camera pose pushed by the simulation.
    #[must_use]
    pub const fn camera(&self) -> Option<(Vec3, f32, f32)> {
        self.camera
    }
}

impl Renderer for NullRenderer {
    fn add_visual(&mut self, _block: &Block) -> VisualHandle {
        self.next_handle += 1;
        self.live += 1;
        VisualHandle::from_raw(self.next_handle)
    }

    fn remove_visual(&mut self, _handle: VisualHandle) {
        self.live = self.live.saturating_sub(1);
    }

    fn set_camera_pose(&mut self, eye: Vec3, yaw: f32, pitch: f32) {
        self.camera = Some((eye, yaw, pitch));
    }
}
