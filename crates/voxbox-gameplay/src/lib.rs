//! # voxbox Gameplay
//!
//! Gameplay systems for voxbox.
//!
//! This crate provides the player side of the sandbox:
//! - Input events, the input queue and the per-step input snapshot
//! - Player pose, shape and camera
//! - Movement physics with per-axis collision against the world store
//! - Hotbar selection
//! - Block break/place along the camera ray
//! - The player controller tying it all together

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod controller;
pub mod hotbar;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod player;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::controller::*;
    pub use crate::hotbar::*;
    pub use crate::input::*;
    pub use crate::interaction::*;
    pub use crate::physics::*;
    pub use crate::player::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use voxbox_world::{NullRenderer, WorldGenerator, WorldStore};

    #[test]
    fn test_player_settles_on_generated_world() {
        let mut generator = WorldGenerator::with_seed(11).expect("valid config");
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();
        generator.generate(&mut store, &mut renderer);

        let mut controller = PlayerController::spawn(&store, &ControllerConfig::default());
        assert!(!store.any_intersecting(&controller.player().aabb()));

        for _ in 0..120 {
            controller.update(&store, &mut renderer, 1.0 / 60.0);
            assert!(!store.any_intersecting(&controller.player().aabb()));
        }
        assert!(controller.player().is_grounded());
        assert_eq!(controller.player().velocity_y(), 0.0);
    }

    #[test]
    fn test_queue_feeds_controller() {
        let mut store = WorldStore::new();
        let mut renderer = NullRenderer::new();
        let queue = InputQueue::new();
        let mut controller = PlayerController::spawn(&store, &ControllerConfig::default());

        queue.push(InputEvent::KeyDown(KeyCode::Num2));
        for event in queue.drain() {
            controller.handle_event(event, &mut store, &mut renderer);
        }
        assert_eq!(controller.hotbar().selected_type(), voxbox_world::BlockType::Dirt);
    }
}
