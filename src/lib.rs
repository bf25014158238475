//! Voronoi-partitioned tile maps
//!
//! A small library for grid-based games: fill a 2D tile grid from terrain
//! palettes, carve it into Voronoi regions with their own terrain groups,
//! and compute a raycast field of view with persistent exploration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_tilemap::*;
//!
//! let config = MapConfigBuilder::new()
//!     .width(48).unwrap()
//!     .height(32).unwrap()
//!     .seed(42)
//!     .build().unwrap();
//!
//! let mut map = TileMap::from_config(config).unwrap();
//!
//! let palette = vec![
//!     TerrainType::new("Grass", "plains").with_characters(['"', ',']),
//!     TerrainType::new("Tree", "forest").with_characters(['T']).blocking_vision(true),
//! ];
//! let sites = [VoronoiSite::new(0, 10, 10), VoronoiSite::new(1, 36, 20)];
//! map.generate_voronoi(48, 32, &sites, &["plains", "forest"], &palette).unwrap();
//!
//! let visible = map.fov(8, 10, 10);
//! println!("{} tiles in view", visible.len());
//! ```
//!
//! # Features
//!
//! - `parallel`: partitions rows on the rayon thread pool
//! - `serde`: enables serialization support for configuration, tiles and regions

// Modules
pub mod cell;
pub mod config;
pub mod error;
pub mod generation;
pub mod grid;
pub mod map;
pub mod random;
pub mod terrain;
pub mod visibility;

// Re-export core types for convenience
pub use cell::Cell;
pub use config::{HexLayout, MapConfig, MapConfigBuilder, MAX_DIMENSION};
pub use error::{Result, TileMapError};
pub use generation::{
    BoundaryCell, CancelToken, GeneratedWorld, InteriorCell, Partition, PartitionCell, Region,
    RegionGraph, VoronoiSite,
};
pub use grid::{Grid, Rect};
pub use map::{TileMap, WorldView};
pub use random::{RandomSource, SeededRandom};
pub use terrain::{default_palette, DefaultTerrainStrategy, FixedPalette, TerrainStrategy, TerrainType};
pub use visibility::fov;

// Re-export glam::Vec2 for convenience
pub use glam::Vec2;
