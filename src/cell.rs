//! Map tile structure

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::terrain::TerrainType;

/// A single tile of the map
///
/// `light` is an accumulator, not a flag: each unobstructed field-of-view
/// ray that samples the tile adds one unit, and an obstruction further along
/// a ray zeroes what that ray had lit. It is only reset when the tile is
/// rebuilt by a generation pass.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Terrain of this tile (with its own, possibly shortened, glyph and colour lists)
    pub terrain: TerrainType,
    /// Accumulated light
    pub light: u32,
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Cell {
    /// Create an unlit cell
    pub fn new(x: i32, y: i32, terrain: TerrainType) -> Self {
        Self {
            terrain,
            light: 0,
            x,
            y,
        }
    }

    /// Whether this tile stops line of sight
    #[inline]
    pub fn blocks_vision(&self) -> bool {
        self.terrain.blocks_vision
    }

    /// Whether this tile stops movement
    #[inline]
    pub fn blocks_movement(&self) -> bool {
        self.terrain.blocks_movement
    }

    /// Whether any light reached this tile
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.light > 0
    }
}
