//! Discrete Voronoi partition of the tile grid
//!
//! Every tile is assigned to the site with the smallest Euclidean distance.
//! Sites are scanned in input order and a tile only changes owner when a
//! site is strictly closer, so on exact ties the earliest site wins.

use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::CancelToken;
use crate::error::{Result, TileMapError};

/// Seed point anchoring one region
///
/// Ids need not be contiguous but should be unique. A site may lie outside
/// the grid; it still competes for tiles but never owns one at distance 0.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoronoiSite {
    pub id: i32,
    pub x: i32,
    pub y: i32,
}

impl VoronoiSite {
    pub fn new(id: i32, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }
}

/// Partition data for one tile
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionCell {
    /// Owning site id; `None` only when there are no sites at all
    pub region_id: Option<i32>,
    /// Distance to the owning site (a sentinel above any real distance if unowned)
    pub distance: f64,
    /// Distance to the nearest edge tile of the owning region
    ///
    /// Filled in by the region graph builder; `None` for unowned tiles.
    pub distance_to_edge: Option<f64>,
}

/// Row-major partition of a `width x height` grid
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Partition {
    width: usize,
    height: usize,
    cells: Vec<PartitionCell>,
}

impl Partition {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether no site owns any tile
    pub fn is_degenerate(&self) -> bool {
        self.cells.iter().all(|c| c.region_id.is_none())
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Partition data at `(x, y)`, `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<&PartitionCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub(crate) fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut PartitionCell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// All partition cells, row-major
    pub fn cells(&self) -> &[PartitionCell] {
        &self.cells
    }
}

/// Euclidean distance between two tile positions
#[inline]
pub fn distance(x1: i32, y1: i32, x2: i32, y2: i32) -> f64 {
    let dx = x1 as f64 - x2 as f64;
    let dy = y1 as f64 - y2 as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Initial state of tile `(x, y)`: owned at distance 0 by the first site on it
fn seed_cell(sites: &[VoronoiSite], x: i32, y: i32, unreachable: f64) -> PartitionCell {
    match sites.iter().find(|s| s.x == x && s.y == y) {
        Some(site) => PartitionCell {
            region_id: Some(site.id),
            distance: 0.0,
            distance_to_edge: None,
        },
        None => PartitionCell {
            region_id: None,
            distance: unreachable,
            distance_to_edge: None,
        },
    }
}

/// Partition a `width x height` grid among `sites`
///
/// Cost is O(sites x width x height). The token is checked before each
/// site's pass over the grid.
///
/// # Errors
///
/// Returns `Cancelled` if `cancel` was triggered.
pub fn partition(
    width: usize,
    height: usize,
    sites: &[VoronoiSite],
    cancel: Option<&CancelToken>,
) -> Result<Partition> {
    let start = Instant::now();
    let unreachable = (width * height + 1) as f64;

    let mut cells = Vec::with_capacity(width * height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            cells.push(seed_cell(sites, x, y, unreachable));
        }
    }

    for site in sites {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(TileMapError::Cancelled);
        }
        for (i, cell) in cells.iter_mut().enumerate() {
            let x = (i % width) as i32;
            let y = (i / width) as i32;
            let dist = distance(site.x, site.y, x, y);
            if dist < cell.distance {
                cell.distance = dist;
                cell.region_id = Some(site.id);
            }
        }
    }

    tracing::debug!(
        width,
        height,
        sites = sites.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "partitioned grid"
    );

    Ok(Partition {
        width,
        height,
        cells,
    })
}

/// Row-parallel variant of [`partition`]
///
/// Each tile tests the sites in input order with the same strict comparison,
/// so the result is identical to the sequential scan. The token is checked
/// once per row.
///
/// # Errors
///
/// Returns `Cancelled` if `cancel` was triggered.
#[cfg(feature = "parallel")]
pub fn partition_parallel(
    width: usize,
    height: usize,
    sites: &[VoronoiSite],
    cancel: Option<&CancelToken>,
) -> Result<Partition> {
    use rayon::prelude::*;

    let start = Instant::now();
    let unreachable = (width * height + 1) as f64;
    let mut cells = vec![
        PartitionCell {
            region_id: None,
            distance: unreachable,
            distance_to_edge: None,
        };
        width * height
    ];

    if width > 0 {
        cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, chunk)| {
                if cancel.is_some_and(CancelToken::is_cancelled) {
                    return;
                }
                let y = row as i32;
                for (col, cell) in chunk.iter_mut().enumerate() {
                    let x = col as i32;
                    *cell = seed_cell(sites, x, y, unreachable);
                    for site in sites {
                        let dist = distance(site.x, site.y, x, y);
                        if dist < cell.distance {
                            cell.distance = dist;
                            cell.region_id = Some(site.id);
                        }
                    }
                }
            });
    }

    if cancel.is_some_and(CancelToken::is_cancelled) {
        return Err(TileMapError::Cancelled);
    }

    tracing::debug!(
        width,
        height,
        sites = sites.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "partitioned grid in parallel"
    );

    Ok(Partition {
        width,
        height,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sites_own_their_tiles() {
        let sites = [VoronoiSite::new(7, 0, 0), VoronoiSite::new(3, 4, 4)];
        let partition = partition(5, 5, &sites, None).unwrap();

        let a = partition.get(0, 0).unwrap();
        assert_eq!(a.region_id, Some(7));
        assert_eq!(a.distance, 0.0);

        let b = partition.get(4, 4).unwrap();
        assert_eq!(b.region_id, Some(3));
        assert_eq!(b.distance, 0.0);
    }

    #[test]
    fn test_tie_goes_to_first_site() {
        let sites = [VoronoiSite::new(1, 0, 0), VoronoiSite::new(2, 4, 4)];
        let p = partition(5, 5, &sites, None).unwrap();
        assert_eq!(p.get(2, 2).unwrap().region_id, Some(1));

        let reversed = [sites[1], sites[0]];
        let p = partition(5, 5, &reversed, None).unwrap();
        assert_eq!(p.get(2, 2).unwrap().region_id, Some(2));
    }

    #[test]
    fn test_every_tile_matches_brute_force_nearest() {
        let sites = [
            VoronoiSite::new(10, 1, 1),
            VoronoiSite::new(20, 8, 2),
            VoronoiSite::new(30, 4, 7),
            VoronoiSite::new(40, 9, 9),
        ];
        let p = partition(10, 10, &sites, None).unwrap();

        for y in 0..10 {
            for x in 0..10 {
                let mut best = &sites[0];
                for site in &sites[1..] {
                    if distance(site.x, site.y, x, y) < distance(best.x, best.y, x, y) {
                        best = site;
                    }
                }
                let cell = p.get(x, y).unwrap();
                assert_eq!(cell.region_id, Some(best.id), "tile ({}, {})", x, y);
                assert_eq!(cell.distance, distance(best.x, best.y, x, y));
            }
        }
    }

    #[test]
    fn test_site_outside_grid_still_competes() {
        let sites = [VoronoiSite::new(1, 0, 0), VoronoiSite::new(2, 6, 2)];
        let p = partition(5, 5, &sites, None).unwrap();

        assert_eq!(p.get(4, 2).unwrap().region_id, Some(2));
        assert!(p.cells().iter().all(|c| c.region_id.is_some()));
        assert!(p.cells().iter().filter(|c| c.distance == 0.0).count() == 1);
    }

    #[test]
    fn test_no_sites_is_degenerate() {
        let p = partition(3, 3, &[], None).unwrap();
        assert!(p.is_degenerate());
        assert_eq!(p.get(1, 1).unwrap().distance, 10.0);
        assert!(p.get(3, 0).is_none());
    }

    #[test]
    fn test_cancelled_partition() {
        let token = CancelToken::new();
        token.cancel();
        let result = partition(4, 4, &[VoronoiSite::new(0, 1, 1)], Some(&token));
        assert_eq!(result.unwrap_err(), TileMapError::Cancelled);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let sites = [
            VoronoiSite::new(0, 2, 3),
            VoronoiSite::new(1, 12, 5),
            VoronoiSite::new(2, 7, 14),
            VoronoiSite::new(3, 7, 4),
        ];
        let seq = partition(16, 16, &sites, None).unwrap();
        let par = partition_parallel(16, 16, &sites, None).unwrap();
        assert_eq!(seq.cells(), par.cells());
    }
}
