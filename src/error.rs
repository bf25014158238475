//! Error types for tile map generation

use std::fmt;

/// Errors that can occur during map configuration or generation
///
/// Out-of-range reads and writes are never errors; they return `None` or
/// do nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum TileMapError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Requested grid dimensions are outside the supported range
    InvalidDimensions {
        /// Requested width in tiles
        width: usize,
        /// Requested height in tiles
        height: usize,
    },
    /// Generation was stopped through a [`CancelToken`](crate::CancelToken)
    Cancelled,
}

impl fmt::Display for TileMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileMapError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            TileMapError::InvalidDimensions { width, height } => {
                write!(f, "invalid map dimensions: {}x{}", width, height)
            }
            TileMapError::Cancelled => write!(f, "generation cancelled"),
        }
    }
}

impl std::error::Error for TileMapError {}

/// Result type alias for tile map operations
pub type Result<T> = std::result::Result<T, TileMapError>;
