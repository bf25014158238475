//! Voronoi map generation pipeline
//!
//! partition -> region graph -> terrain population. Every pass rebuilds its
//! output from scratch; nothing is updated incrementally.

pub mod partition;
pub mod populate;
pub mod regions;

pub use partition::{Partition, PartitionCell, VoronoiSite};
pub use regions::{BoundaryCell, InteriorCell, Region, RegionGraph};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::MAX_DIMENSION;
use crate::error::{Result, TileMapError};
use crate::grid::Grid;
use crate::random::RandomSource;
use crate::terrain::{PaletteOverride, TerrainStrategy, TerrainType};

/// Shared flag for stopping a running generation
///
/// Cloning shares the flag. Generation checks it between site passes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything produced by one generation pass
#[derive(Debug, Clone, Default)]
pub struct GeneratedWorld {
    pub grid: Grid,
    pub partition: Partition,
    pub graph: RegionGraph,
}

/// Reject grids too large to scan
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(TileMapError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Run the full pipeline for `sites`
///
/// The grid is first filled tile by tile from the whole `palette` (choices
/// made by `strategy`), then every region overwrites its tiles with terrain
/// from its assigned group.
///
/// # Errors
///
/// - `InvalidDimensions` if either dimension exceeds [`MAX_DIMENSION`]
/// - `InvalidConfig` if `groups` is empty
/// - `Cancelled` if `cancel` is triggered before the partition completes
#[allow(clippy::too_many_arguments)]
pub fn generate_world<S>(
    width: usize,
    height: usize,
    sites: &[VoronoiSite],
    groups: &[S],
    palette: &[TerrainType],
    strategy: &dyn TerrainStrategy,
    rng: &mut dyn RandomSource,
    cancel: Option<&CancelToken>,
) -> Result<GeneratedWorld>
where
    S: AsRef<str>,
{
    check_dimensions(width, height)?;
    if groups.is_empty() {
        return Err(TileMapError::InvalidConfig(
            "at least one terrain group is required".into(),
        ));
    }

    let start = Instant::now();

    let base = PaletteOverride {
        select: |_x: i32, _y: i32| palette.to_vec(),
        base: strategy,
    };
    let mut grid = populate::populate_default(width, height, &base, rng);

    #[cfg(feature = "parallel")]
    let mut partition = partition::partition_parallel(width, height, sites, cancel)?;
    #[cfg(not(feature = "parallel"))]
    let mut partition = partition::partition(width, height, sites, cancel)?;

    let graph = RegionGraph::build(&partition, sites);
    graph.annotate_edge_distances(&mut partition);

    let region_groups = populate::assign_groups(sites, groups, rng)?;
    populate::populate_regions(&mut grid, &graph, &region_groups, palette, rng);

    tracing::debug!(
        width,
        height,
        sites = sites.len(),
        regions = graph.regions().len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "generated voronoi map"
    );

    Ok(GeneratedWorld {
        grid,
        partition,
        graph,
    })
}
