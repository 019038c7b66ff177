//! # voxbox Engine
//!
//! Runs the sandbox headless: configuration loading, a renderer that
//! records visuals instead of drawing them, fixed-step frame timing, the
//! session that owns the world and the player, and a scripted demo.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
pub mod demo;
pub mod renderer;
pub mod timing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::*;
    pub use crate::config::*;
    pub use crate::demo::*;
    pub use crate::renderer::*;
    pub use crate::timing::*;
}

pub use prelude::*;
