//! TileMap: the explicit map context
//!
//! Holds the grid, exploration mask, partition and region graph of one map,
//! together with the terrain strategy and random source used to build it.
//! Independent maps are independent values; a map is `Send` when its random
//! source is.

use glam::Vec2;

use crate::cell::Cell;
use crate::config::{HexLayout, MapConfig};
use crate::error::Result;
use crate::generation::populate::populate_default;
use crate::generation::{
    check_dimensions, generate_world, CancelToken, GeneratedWorld, Partition, PartitionCell,
    Region, RegionGraph, VoronoiSite,
};
use crate::grid::Grid;
use crate::random::{RandomSource, SeededRandom};
use crate::terrain::{DefaultTerrainStrategy, PaletteOverride, TerrainStrategy, TerrainType};
use crate::visibility;

/// Borrowed view of a generated map
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    /// Populated tiles
    pub grid: &'a Grid,
    /// Exploration mask, row-major
    pub explored: &'a [bool],
    /// Per-tile partition data
    pub partition: &'a Partition,
    /// Regions, in site order
    pub regions: &'a [Region],
}

/// A tile map with Voronoi generation and field of view
///
/// # Example
///
/// ```rust
/// use voronoi_tilemap::*;
///
/// let mut map = TileMap::new(42);
/// let palette = vec![
///     TerrainType::new("Grass", "plains").with_characters(['"', ',']),
///     TerrainType::new("Rock", "hills").blocking_vision(true),
/// ];
/// let sites = [VoronoiSite::new(0, 3, 3), VoronoiSite::new(1, 12, 8)];
///
/// map.generate_voronoi(16, 12, &sites, &["plains", "hills"], &palette).unwrap();
/// assert!(map.get_region(1).is_some());
///
/// let visible = map.fov(4, 3, 3);
/// assert!(visible.iter().all(|c| map.is_explored(c.x, c.y)));
/// ```
pub struct TileMap<R = SeededRandom> {
    grid: Grid,
    partition: Partition,
    graph: RegionGraph,
    layout: HexLayout,
    strategy: Box<dyn TerrainStrategy + Send + Sync>,
    rng: R,
}

impl TileMap<SeededRandom> {
    /// Create an empty map with a seeded ChaCha random source
    pub fn new(seed: u64) -> Self {
        Self::with_random(SeededRandom::new(seed))
    }

    /// Create a map from a configuration and initialize its grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the configured size is too large.
    pub fn from_config(config: MapConfig) -> Result<Self> {
        let mut map = Self::new(config.seed);
        map.layout = config.hex_layout;
        map.initialize(config.width, config.height)?;
        Ok(map)
    }
}

impl<R: RandomSource> TileMap<R> {
    /// Create an empty map drawing all randomness from `rng`
    pub fn with_random(rng: R) -> Self {
        Self {
            grid: Grid::default(),
            partition: Partition::default(),
            graph: RegionGraph::default(),
            layout: HexLayout::default(),
            strategy: Box::new(DefaultTerrainStrategy),
            rng,
        }
    }

    /// Replace the strategy used by [`initialize`](Self::initialize)
    ///
    /// Its `choose_terrain` is also used for the base layer of
    /// [`generate_voronoi`](Self::generate_voronoi).
    pub fn set_terrain_strategy<S>(&mut self, strategy: S)
    where
        S: TerrainStrategy + Send + Sync + 'static,
    {
        self.strategy = Box::new(strategy);
    }

    /// Replace the random source
    pub fn set_random_source(&mut self, rng: R) {
        self.rng = rng;
    }

    /// Replace the tile-to-world layout
    pub fn set_hex_layout(&mut self, layout: HexLayout) {
        self.layout = layout;
    }

    /// Drop all tiles, exploration, partition and regions
    pub fn clear_map(&mut self) {
        self.grid = Grid::default();
        self.partition = Partition::default();
        self.graph = RegionGraph::default();
    }

    /// Rebuild a `width x height` grid using the current terrain strategy
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if a dimension exceeds
    /// [`MAX_DIMENSION`](crate::MAX_DIMENSION).
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<()> {
        check_dimensions(width, height)?;
        self.clear_map();
        self.grid = populate_default(width, height, self.strategy.as_ref(), &mut self.rng);
        tracing::debug!(width, height, "initialized map");
        Ok(())
    }

    /// Rebuild the grid with palettes from `select_palette`
    ///
    /// Terrain is still chosen by the current strategy's `choose_terrain`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if a dimension exceeds
    /// [`MAX_DIMENSION`](crate::MAX_DIMENSION).
    pub fn initialize_with<F>(&mut self, width: usize, height: usize, select_palette: F) -> Result<()>
    where
        F: Fn(i32, i32) -> Vec<TerrainType>,
    {
        check_dimensions(width, height)?;
        self.clear_map();
        let strategy = PaletteOverride {
            select: select_palette,
            base: self.strategy.as_ref(),
        };
        self.grid = populate_default(width, height, &strategy, &mut self.rng);
        tracing::debug!(width, height, "initialized map with custom palettes");
        Ok(())
    }

    /// Partition the grid around `sites` and populate every region
    ///
    /// Each region gets one group from `groups`; its tiles are drawn from
    /// the entries of `palette` in that group, with edges blended with
    /// neighbouring regions.
    ///
    /// # Errors
    ///
    /// - `InvalidDimensions` if a dimension exceeds [`MAX_DIMENSION`](crate::MAX_DIMENSION)
    /// - `InvalidConfig` if `groups` is empty
    ///
    /// The map is left cleared on error.
    pub fn generate_voronoi<S>(
        &mut self,
        width: usize,
        height: usize,
        sites: &[VoronoiSite],
        groups: &[S],
        palette: &[TerrainType],
    ) -> Result<WorldView<'_>>
    where
        S: AsRef<str>,
    {
        self.generate(width, height, sites, groups, palette, None)
    }

    /// [`generate_voronoi`](Self::generate_voronoi) that stops early when `cancel` is triggered
    ///
    /// # Errors
    ///
    /// As `generate_voronoi`, plus `Cancelled`.
    pub fn generate_voronoi_cancellable<S>(
        &mut self,
        width: usize,
        height: usize,
        sites: &[VoronoiSite],
        groups: &[S],
        palette: &[TerrainType],
        cancel: &CancelToken,
    ) -> Result<WorldView<'_>>
    where
        S: AsRef<str>,
    {
        self.generate(width, height, sites, groups, palette, Some(cancel))
    }

    fn generate<S>(
        &mut self,
        width: usize,
        height: usize,
        sites: &[VoronoiSite],
        groups: &[S],
        palette: &[TerrainType],
        cancel: Option<&CancelToken>,
    ) -> Result<WorldView<'_>>
    where
        S: AsRef<str>,
    {
        self.clear_map();
        let GeneratedWorld {
            grid,
            partition,
            graph,
        } = generate_world(
            width,
            height,
            sites,
            groups,
            palette,
            self.strategy.as_ref(),
            &mut self.rng,
            cancel,
        )?;

        self.grid = grid;
        self.partition = partition;
        self.graph = graph;
        Ok(self.world())
    }

    /// Borrow the current map contents
    pub fn world(&self) -> WorldView<'_> {
        WorldView {
            grid: &self.grid,
            explored: self.grid.explored_mask(),
            partition: &self.partition,
            regions: self.graph.regions(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Region with the given site id
    pub fn get_region(&self, id: i32) -> Option<&Region> {
        self.graph.region(id)
    }

    /// All regions of the last generation, in site order
    pub fn regions(&self) -> &[Region] {
        self.graph.regions()
    }

    /// Partition data at `(x, y)`; `None` outside the grid or before any generation
    pub fn partition_cell(&self, x: i32, y: i32) -> Option<&PartitionCell> {
        self.partition.get(x, y)
    }

    /// Tile at `(x, y)`, `None` outside the grid
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.grid.get(x, y)
    }

    /// Store a tile at its own coordinates; ignored outside the grid
    pub fn set_cell(&mut self, cell: Cell) {
        self.grid.set(cell);
    }

    /// Tiles whose terrain satisfies `predicate`, row-major
    pub fn get_cells<P>(&self, predicate: P) -> Vec<&Cell>
    where
        P: FnMut(&TerrainType) -> bool,
    {
        self.grid.cells_matching(predicate)
    }

    pub fn set_explored(&mut self, x: i32, y: i32) {
        self.grid.set_explored(x, y);
    }

    pub fn set_all_explored(&mut self) {
        self.grid.set_all_explored();
    }

    /// `false` outside the grid
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.grid.is_explored(x, y)
    }

    /// Every explored tile, row-major
    pub fn get_explored_cells(&self) -> Vec<&Cell> {
        self.grid.explored_cells()
    }

    /// Field of view of an observer at `(x, y)`; see [`visibility::fov`]
    pub fn fov(&mut self, radius: i32, x: i32, y: i32) -> Vec<Cell> {
        visibility::fov(&mut self.grid, radius, x, y)
    }

    /// World position of tile `(x, y)` on the hex layout, `None` outside the grid
    pub fn world_coords(&self, x: i32, y: i32) -> Option<Vec2> {
        self.grid
            .in_bounds(x, y)
            .then(|| self.layout.to_world(x, y))
    }
}
