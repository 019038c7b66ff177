//! Engine configuration.
//!
//! One TOML file with a section per subsystem. Every field has a default,
//! so a partial file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use voxbox_common::{ConfigError, VoxboxResult};
use voxbox_gameplay::{ControllerConfig, InteractionConfig, LookConfig, PhysicsConfig, PlayerConfig};
use voxbox_world::GeneratorConfig;

/// Configuration file name.
const CONFIG_FILE: &str = "voxbox.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "VOXBOX_CONFIG";

/// Session loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulation step length in seconds
    pub fixed_dt: f32,
    /// Largest frame delta accepted by the step accumulator
    pub max_frame_dt: f32,
    /// Frames the scripted demo runs for
    pub demo_frames: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frame_dt: 0.25,
            demo_frames: 240,
        }
    }
}

/// Engine configuration parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation
    pub world: GeneratorConfig,
    /// Player shape
    pub player: PlayerConfig,
    /// Movement physics
    pub physics: PhysicsConfig,
    /// Hotbar and reach
    pub interaction: InteractionConfig,
    /// Mouse look
    pub input: LookConfig,
    /// Frame loop
    pub session: SessionConfig,
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    #[must_use]
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file: {e}");
                return Self::default();
            },
        };

        match Self::parse(&contents) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("{e}; using defaults");
                Self::default()
            },
        }
    }

    /// Parses configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> VoxboxResult<()> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Configuration file path: `$VOXBOX_CONFIG` or `voxbox.toml` in the
    /// working directory.
    #[must_use]
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV).map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Checks for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;

        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        };

        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.depth", self.player.depth)?;
        positive("physics.epsilon", self.physics.epsilon)?;
        positive("physics.ground_probe", self.physics.ground_probe)?;
        positive("session.fixed_dt", self.session.fixed_dt)?;
        positive("session.max_frame_dt", self.session.max_frame_dt)?;
        if let Some(reach) = self.interaction.reach {
            positive("interaction.reach", reach)?;
        }
        if !self.input.sensitivity.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "input.sensitivity",
                reason: "must be finite".to_string(),
            });
        }
        if self.interaction.hotbar.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "interaction.hotbar",
                reason: "needs at least one block type".to_string(),
            });
        }
        Ok(())
    }

    /// Player controller settings.
    #[must_use]
    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            player: self.player,
            physics: self.physics,
            interaction: self.interaction.clone(),
            look: self.input,
        }
    }
}
