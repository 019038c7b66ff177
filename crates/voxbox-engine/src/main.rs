//! # voxbox
//!
//! Headless entry point: generates a world, spawns the player and drives a
//! short scripted session, logging a summary at the end.

#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use voxbox_engine::{default_script, run_script, EngineConfig, Session};

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("voxbox=info".parse()?))
        .init();

    info!("voxbox starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = EngineConfig::load();
    let mut session = Session::new(&config).context("failed to start session")?;

    let summary = run_script(&mut session, &default_script(), config.session.demo_frames);
    info!(
        "Player at ({:.2}, {:.2}, {:.2}), yaw {:.3}, pitch {:.3}",
        summary.position.x, summary.position.y, summary.position.z, summary.yaw, summary.pitch
    );

    info!("voxbox shutdown complete");
    Ok(())
}
