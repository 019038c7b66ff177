//! Error types for voxbox.

use thiserror::Error;

/// Top-level error type for voxbox operations.
#[derive(Debug, Error)]
pub enum VoxboxError {
    /// World/generation errors
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Input errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// World generation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// World footprint has no columns
    #[error("World size must be non-zero, got {width}x{depth}")]
    EmptyWorld {
        /// Columns along X
        width: u32,
        /// Columns along Z
        depth: u32,
    },

    /// Column height cap below one block
    #[error("max_height must be at least 1, got {0}")]
    InvalidMaxHeight(u32),

    /// Tree height range is inverted
    #[error("Tree height range [{min}, {max}] is inverted")]
    InvalidTreeRange {
        /// Shortest trunk
        min: u32,
        /// Tallest trunk
        max: u32,
    },

    /// Probability outside [0, 1]
    #[error("Tree probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Noise frequency divisor must be positive
    #[error("Noise scale must be positive, got {0}")]
    InvalidNoiseScale(f64),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Config file could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// A field holds an impossible value
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// World section rejected
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Input queue errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// All receivers of the input queue are gone
    #[error("Input queue disconnected")]
    Disconnected,
}

/// Result type alias for voxbox operations.
pub type VoxboxResult<T> = Result<T, VoxboxError>;
