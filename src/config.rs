//! Tile map configuration and builder
//!
//! A [`MapConfig`] fixes the grid size, the random seed and the hex layout
//! used to convert tile coordinates into world positions. The same
//! configuration and the same generation calls always produce the same map.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::Vec2;

use crate::error::{Result, TileMapError};

/// Largest accepted width or height.
///
/// Voronoi partitioning scans every tile once per site, so very large grids
/// are better split into several maps.
pub const MAX_DIMENSION: usize = 4096;

/// Offsets used to place tiles on a staggered hex layout
///
/// Columns advance by `offset_x`. Rows advance by `offset_y`, and even
/// columns are pushed down by half a row.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    /// Horizontal distance between adjacent columns
    pub offset_x: f32,
    /// Vertical distance between adjacent rows
    pub offset_y: f32,
}

impl HexLayout {
    /// Create a layout with custom offsets
    pub fn new(offset_x: f32, offset_y: f32) -> Self {
        Self { offset_x, offset_y }
    }

    /// World position of tile `(x, y)`
    ///
    /// No bounds checking happens here; see
    /// [`TileMap::world_coords`](crate::TileMap::world_coords).
    pub fn to_world(&self, x: i32, y: i32) -> Vec2 {
        let stagger = if x % 2 == 0 { 0.5 * self.offset_y } else { 0.0 };
        Vec2::new(
            (x + 1) as f32 * self.offset_x,
            y as f32 * self.offset_y + stagger,
        )
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            offset_x: 1.5,
            offset_y: 2.0,
        }
    }
}

/// Configuration for a tile map
///
/// # Example
///
/// ```rust
/// use voronoi_tilemap::*;
///
/// let config = MapConfigBuilder::new()
///     .width(40).unwrap()
///     .height(20).unwrap()
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tile_count(), 800);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Grid width in tiles
    pub width: usize,
    /// Grid height in tiles
    pub height: usize,
    /// Seed for the default random source
    pub seed: u64,
    /// Tile-to-world conversion
    pub hex_layout: HexLayout,
}

impl MapConfig {
    /// Total number of tiles
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            seed: 0,
            hex_layout: HexLayout::default(),
        }
    }
}

fn check_dimension(name: &str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(TileMapError::InvalidConfig(format!(
            "{} must be in 1..={} (got {})",
            name, MAX_DIMENSION, value
        )));
    }
    Ok(())
}

/// Builder for [`MapConfig`] with validation
///
/// Defaults: 64x64 tiles, a random seed, [`HexLayout::default`].
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    width: usize,
    height: usize,
    seed: Option<u64>,
    hex_layout: HexLayout,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            width: 64,
            height: 64,
            seed: None,
            hex_layout: HexLayout::default(),
        }
    }

    /// Set the grid width
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if width is 0 or above [`MAX_DIMENSION`]
    pub fn width(mut self, width: usize) -> Result<Self> {
        check_dimension("width", width)?;
        self.width = width;
        Ok(self)
    }

    /// Set the grid height
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if height is 0 or above [`MAX_DIMENSION`]
    pub fn height(mut self, height: usize) -> Result<Self> {
        check_dimension("height", height)?;
        self.height = height;
        Ok(self)
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the hex layout
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either offset is not a positive finite number
    pub fn hex_layout(mut self, layout: HexLayout) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(layout.offset_x) || !valid(layout.offset_y) {
            return Err(TileMapError::InvalidConfig(format!(
                "hex offsets must be positive (got {}, {})",
                layout.offset_x, layout.offset_y
            )));
        }
        self.hex_layout = layout;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn from the thread RNG.
    pub fn build(self) -> Result<MapConfig> {
        Ok(MapConfig {
            width: self.width,
            height: self.height,
            seed: self.seed.unwrap_or_else(rand::random),
            hex_layout: self.hex_layout,
        })
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
