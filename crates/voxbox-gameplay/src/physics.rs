//! Player physics: gravity, jumping and per-axis collision against the
//! world store.
//!
//! Movement is discrete. Each step moves the player along X, then Z, then
//! Y, and each axis is resolved on its own: a blocked horizontal axis simply
//! discards its displacement (no sliding), while a blocked vertical axis
//! snaps the player onto the floor or under the ceiling it hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use voxbox_world::WorldStore;

use crate::input::MoveIntent;
use crate::player::Player;

/// Movement physics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Walk speed in units per second
    pub speed: f32,
    /// Speed multiplier while running
    pub run_multiplier: f32,
    /// Upward velocity at the start of a jump
    pub jump_velocity: f32,
    /// Vertical acceleration (negative = downward)
    pub gravity: f32,
    /// Clearance kept between the player and a floor or ceiling
    pub epsilon: f32,
    /// How far below the player the ground probe reaches
    pub ground_probe: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            run_multiplier: 1.9,
            jump_velocity: 11.0,
            gravity: -25.0,
            epsilon: 1e-4,
            ground_probe: 0.05,
        }
    }
}

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis (up)
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Unit vector along this axis.
    #[must_use]
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Result of a single-axis move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Zero displacement
    Idle,
    /// The full displacement was applied
    Moved,
    /// Horizontal move discarded because of a collision
    Blocked,
    /// Falling move ended on top of a block
    Landed,
    /// Rising move ended under a block
    HitCeiling,
}

/// What happened during one physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Ground probe result at the start of the step
    pub grounded: bool,
    /// A jump was started this step
    pub jumped: bool,
    /// Outcome of the X move
    pub x: MoveOutcome,
    /// Outcome of the Z move
    pub z: MoveOutcome,
    /// Outcome of the Y move
    pub y: MoveOutcome,
}

/// Player physics simulation.
#[derive(Debug, Clone, Default)]
pub struct PlayerPhysics {
    config: PhysicsConfig,
}

impl PlayerPhysics {
    /// Creates a new physics system with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a physics system with custom configuration.
    #[must_use]
    pub const fn with_config(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Returns the physics configuration.
    #[must_use]
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Checks whether the player's box, nudged down by the ground probe,
    /// touches any block.
    #[must_use]
    pub fn is_grounded(&self, player: &Player, store: &WorldStore) -> bool {
        let probe = player.aabb().translated(Vec3::NEG_Y * self.config.ground_probe);
        store.any_intersecting(&probe)
    }

    /// Horizontal displacement for one step of `dt` seconds.
    #[must_use]
    pub fn horizontal_displacement(&self, player: &Player, intent: &MoveIntent, dt: f32) -> Vec3 {
        let wish = player.forward() * intent.forward + player.right() * intent.strafe;
        if wish == Vec3::ZERO {
            return Vec3::ZERO;
        }
        let speed = if intent.run {
            self.config.speed * self.config.run_multiplier
        } else {
            self.config.speed
        };
        wish.normalize_or_zero() * speed * dt
    }

    /// Moves the player by `delta` along one axis, resolving collisions.
    pub fn try_move(
        &self,
        player: &mut Player,
        store: &WorldStore,
        axis: Axis,
        delta: f32,
    ) -> MoveOutcome {
        if delta == 0.0 {
            return MoveOutcome::Idle;
        }

        let start = player.position();
        let target = start + axis.unit() * delta;
        let candidate = player.aabb_at(target);

        // Nearest blocking face along the direction of travel
        let mut blocking: Option<f32> = None;
        for stored in store.intersecting(&candidate) {
            let block = stored.block();
            let face = if delta < 0.0 { block.top() } else { block.bottom() };
            blocking = Some(match blocking {
                None => face,
                Some(f) if delta < 0.0 => f.max(face),
                Some(f) => f.min(face),
            });
        }

        let Some(face) = blocking else {
            player.set_position(target);
            return MoveOutcome::Moved;
        };

        if axis != Axis::Y {
            trace!("{:?} move of {:.4} blocked", axis, delta);
            return MoveOutcome::Blocked;
        }

        let half_height = player.config().height * 0.5;
        let (snapped_y, outcome) = if delta < 0.0 {
            (face + half_height + self.config.epsilon, MoveOutcome::Landed)
        } else {
            (face - half_height - self.config.epsilon, MoveOutcome::HitCeiling)
        };
        let snapped = Vec3::new(start.x, snapped_y, start.z);

        player.set_velocity_y(0.0);
        if store.any_intersecting(&player.aabb_at(snapped)) {
            // Wedged between blocks: keep the last free position
            trace!("Snap to y={:.4} still overlaps, staying put", snapped_y);
        } else {
            player.set_position(snapped);
        }
        outcome
    }

    /// Advances the player by one step of `dt` seconds.
    pub fn step(
        &self,
        player: &mut Player,
        intent: &MoveIntent,
        store: &WorldStore,
        dt: f32,
    ) -> StepReport {
        let horizontal = self.horizontal_displacement(player, intent, dt);

        let grounded = self.is_grounded(player, store);
        player.set_grounded(grounded);

        let jumped = intent.jump && grounded;
        if jumped {
            player.set_velocity_y(self.config.jump_velocity);
            debug!("Jump from y={:.3}", player.position().y);
        }
        player.set_velocity_y(player.velocity_y() + self.config.gravity * dt);

        let x = self.try_move(player, store, Axis::X, horizontal.x);
        let z = self.try_move(player, store, Axis::Z, horizontal.z);
        let falling = player.velocity_y() < 0.0;
        let y = self.try_move(player, store, Axis::Y, player.velocity_y() * dt);

        if y == MoveOutcome::Landed && falling && !grounded {
            debug!("Landed at y={:.3}", player.position().y);
        }

        StepReport {
            grounded,
            jumped,
            x,
            z,
            y,
        }
    }
}
