//! Player pose, shape and camera.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::info;
use voxbox_world::{spawn_top, Aabb, Ray, WorldStore};

/// Pitch is kept this far away from straight up or down.
const PITCH_MARGIN: f32 = 0.01;

/// Largest absolute pitch in radians.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;

/// Player shape configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Collision box extent along X
    pub width: f32,
    /// Collision box extent along Y
    pub height: f32,
    /// Collision box extent along Z
    pub depth: f32,
    /// Distance of the eye below the top of the box
    pub eye_drop: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 0.6,
            height: 1.8,
            depth: 0.6,
            eye_drop: 0.15,
        }
    }
}

impl PlayerConfig {
    /// Half of the collision box size on each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) * 0.5
    }

    /// Eye height above the box centre.
    #[must_use]
    pub fn eye_offset(&self) -> f32 {
        self.height * 0.5 - self.eye_drop
    }
}

/// The player: a box with a position, a view direction and vertical velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Centre of the collision box
    position: Vec3,
    /// Rotation around +Y in radians (0 looks down -Z)
    yaw: f32,
    /// Rotation above the horizon in radians
    pitch: f32,
    /// Vertical velocity in units per second
    velocity_y: f32,
    /// Result of the last ground probe
    grounded: bool,
    /// Shape
    config: PlayerConfig,
}

impl Player {
    /// Creates a player at the given position, looking down -Z.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self::with_config(position, PlayerConfig::default())
    }

    /// Creates a player with a custom shape.
    #[must_use]
    pub fn with_config(position: Vec3, config: PlayerConfig) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity_y: 0.0,
            grounded: false,
            config,
        }
    }

    /// Spawns a player standing on column (0, 0).
    #[must_use]
    pub fn spawn(store: &WorldStore, config: PlayerConfig) -> Self {
        let position = Self::spawn_position(store, &config);
        info!(
            "Player spawned at ({:.2}, {:.2}, {:.2})",
            position.x, position.y, position.z
        );
        Self::with_config(position, config)
    }

    /// Position whose box rests on the top block of column (0, 0).
    #[must_use]
    pub fn spawn_position(store: &WorldStore, config: &PlayerConfig) -> Vec3 {
        let top = spawn_top(store) as f32;
        Vec3::new(0.0, top + 0.5 + config.height * 0.5, 0.0)
    }

    /// Get the player's current position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the player's position directly.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Yaw in radians.
    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians.
    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Sets the view angles, clamping pitch.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Vertical velocity.
    #[must_use]
    pub const fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    /// Set the vertical velocity.
    pub fn set_velocity_y(&mut self, velocity_y: f32) {
        self.velocity_y = velocity_y;
    }

    /// Ground probe result from the most recent step.
    #[must_use]
    pub const fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub(crate) fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Shape configuration.
    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Applies a mouse-look delta.
    pub fn rotate(&mut self, delta: Vec2, sensitivity: f32) {
        if delta == Vec2::ZERO {
            return;
        }
        self.set_orientation(
            self.yaw - delta.x * sensitivity,
            self.pitch - delta.y * sensitivity,
        );
    }

    /// Collision box centred on `position`.
    #[must_use]
    pub fn aabb_at(&self, position: Vec3) -> Aabb {
        Aabb::from_center(position, self.config.half_extents())
    }

    /// Collision box at the current position.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.aabb_at(self.position)
    }

    /// Horizontal unit vector the player walks along when moving forward.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal unit vector pointing to the player's right.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Camera eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::Y * self.config.eye_offset()
    }

    /// Unit view direction including pitch.
    #[must_use]
    pub fn look_direction(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            -self.yaw.sin() * cos_pitch,
            sin_pitch,
            -self.yaw.cos() * cos_pitch,
        )
    }

    /// Ray from the eye along the view direction.
    #[must_use]
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.eye(), self.look_direction())
    }
}
