//! Region graph derived from a partition
//!
//! Each owned tile is compared with its four axis-aligned neighbours. A tile
//! with any disagreeing neighbour (a different region, or off the grid) is an
//! edge; three or more disagreeing neighbours also make it a corner. Tiles
//! with none are interior tiles.

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::partition::{distance, Partition, VoronoiSite};

/// Neighbour offsets in the order disagreement ids are recorded: east, west, south, north
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Disagreeing neighbours needed before an edge tile counts as a corner
const CORNER_THRESHOLD: usize = 3;

/// Edge or corner tile of a region
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryCell {
    pub region_id: i32,
    pub x: i32,
    pub y: i32,
    /// Distinct ids of adjacent tiles' regions other than `region_id`
    ///
    /// Empty for tiles that only border the edge of the grid.
    pub neighbour_region_ids: Vec<i32>,
}

/// Tile whose four neighbours all share its region
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteriorCell {
    pub region_id: i32,
    pub x: i32,
    pub y: i32,
}

/// One Voronoi region with its cached tile classification
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: i32,
    pub site: VoronoiSite,
    /// Every boundary tile, corners included
    pub edge_cells: Vec<BoundaryCell>,
    pub corner_cells: Vec<BoundaryCell>,
    /// Regions sharing a boundary with this one; never contains `id`
    pub neighbour_ids: BTreeSet<i32>,
    pub interior_cells: Vec<InteriorCell>,
}

impl Region {
    #[inline]
    pub fn is_neighbour_of(&self, other_id: i32) -> bool {
        self.neighbour_ids.contains(&other_id)
    }

    /// Number of tiles owned by this region
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.edge_cells.len() + self.interior_cells.len()
    }
}

/// Tile classification of a whole partition plus one [`Region`] per site
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RegionGraph {
    edges: Vec<BoundaryCell>,
    corners: Vec<BoundaryCell>,
    interiors: Vec<InteriorCell>,
    regions: Vec<Region>,
}

impl RegionGraph {
    /// Classify every owned tile and build the regions, in site order
    ///
    /// Tiles without an owner (no sites) are left unclassified.
    pub fn build(partition: &Partition, sites: &[VoronoiSite]) -> Self {
        let start = Instant::now();
        let mut edges = Vec::new();
        let mut corners = Vec::new();
        let mut interiors = Vec::new();

        for y in 0..partition.height() as i32 {
            for x in 0..partition.width() as i32 {
                let Some(region_id) = partition.get(x, y).and_then(|c| c.region_id) else {
                    continue;
                };

                let mut disagreeing = 0;
                let mut neighbour_region_ids = Vec::new();
                for (dx, dy) in NEIGHBOUR_OFFSETS {
                    let neighbour = partition.get(x + dx, y + dy).and_then(|c| c.region_id);
                    if neighbour == Some(region_id) {
                        continue;
                    }
                    disagreeing += 1;
                    if let Some(other) = neighbour {
                        if !neighbour_region_ids.contains(&other) {
                            neighbour_region_ids.push(other);
                        }
                    }
                }

                if disagreeing == 0 {
                    interiors.push(InteriorCell { region_id, x, y });
                    continue;
                }

                let cell = BoundaryCell {
                    region_id,
                    x,
                    y,
                    neighbour_region_ids,
                };
                if disagreeing >= CORNER_THRESHOLD {
                    corners.push(cell.clone());
                }
                edges.push(cell);
            }
        }

        let regions: Vec<Region> = sites
            .iter()
            .map(|site| {
                let edge_cells: Vec<BoundaryCell> =
                    edges.iter().filter(|e| e.region_id == site.id).cloned().collect();
                let neighbour_ids = edge_cells
                    .iter()
                    .flat_map(|e| e.neighbour_region_ids.iter().copied())
                    .filter(|&id| id != site.id)
                    .collect();

                Region {
                    id: site.id,
                    site: *site,
                    corner_cells: corners.iter().filter(|c| c.region_id == site.id).cloned().collect(),
                    edge_cells,
                    neighbour_ids,
                    interior_cells: interiors
                        .iter()
                        .filter(|m| m.region_id == site.id)
                        .copied()
                        .collect(),
                }
            })
            .collect();

        tracing::debug!(
            regions = regions.len(),
            edges = edges.len(),
            corners = corners.len(),
            interiors = interiors.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "built region graph"
        );

        Self {
            edges,
            corners,
            interiors,
            regions,
        }
    }

    /// Region with the given id, `None` if no site has it
    pub fn region(&self, id: i32) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// All regions, in site order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Every edge tile of the map, row-major
    pub fn edges(&self) -> &[BoundaryCell] {
        &self.edges
    }

    /// Every corner tile of the map, row-major
    pub fn corners(&self) -> &[BoundaryCell] {
        &self.corners
    }

    /// Every interior tile of the map, row-major
    pub fn interiors(&self) -> &[InteriorCell] {
        &self.interiors
    }

    /// Fill in `distance_to_edge` for every tile of `partition`
    ///
    /// Each tile gets the distance to the closest edge tile of its own
    /// region. Tiles with no owner, or whose owner has no region here, get `None`.
    pub fn annotate_edge_distances(&self, partition: &mut Partition) {
        let by_id: HashMap<i32, &Region> = self.regions.iter().map(|r| (r.id, r)).collect();

        for y in 0..partition.height() as i32 {
            for x in 0..partition.width() as i32 {
                let Some(cell) = partition.get_mut(x, y) else {
                    continue;
                };
                cell.distance_to_edge = cell
                    .region_id
                    .and_then(|id| by_id.get(&id))
                    .and_then(|region| {
                        region
                            .edge_cells
                            .iter()
                            .map(|e| distance(e.x, e.y, x, y))
                            .min_by(f64::total_cmp)
                    });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::partition::partition;

    fn two_halves() -> (Partition, Vec<VoronoiSite>) {
        // Site 0 owns columns 0..=2, site 1 owns columns 3..=5 of a 6x6 grid
        let sites = vec![VoronoiSite::new(0, 1, 2), VoronoiSite::new(1, 4, 2)];
        (partition(6, 6, &sites, None).unwrap(), sites)
    }

    #[test]
    fn test_two_regions_are_neighbours() {
        let (p, sites) = two_halves();
        let graph = RegionGraph::build(&p, &sites);

        let a = graph.region(0).unwrap();
        let b = graph.region(1).unwrap();
        assert!(a.is_neighbour_of(1));
        assert!(b.is_neighbour_of(0));
        assert!(!a.is_neighbour_of(0));
        assert_eq!(a.tile_count() + b.tile_count(), 36);
    }

    #[test]
    fn test_classification() {
        let (p, sites) = two_halves();
        let graph = RegionGraph::build(&p, &sites);
        let a = graph.region(0).unwrap();

        // Interior of region 0 is columns 1..=1, rows 1..=4
        let interior: Vec<_> = a.interior_cells.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(interior, vec![(1, 1), (1, 2), (1, 3), (1, 4)]);

        // Column 2 borders region 1
        let seam = a.edge_cells.iter().find(|e| (e.x, e.y) == (2, 3)).unwrap();
        assert_eq!(seam.neighbour_region_ids, vec![1]);

        // Column 0 only borders the grid edge
        let rim = a.edge_cells.iter().find(|e| (e.x, e.y) == (0, 3)).unwrap();
        assert!(rim.neighbour_region_ids.is_empty());

        // At most two sides disagree anywhere in a three-wide strip
        assert!(a.corner_cells.is_empty());
    }

    #[test]
    fn test_corner_needs_three_disagreeing_sides() {
        let sites = vec![VoronoiSite::new(9, 0, 0)];
        let p = partition(3, 1, &sites, None).unwrap();
        let graph = RegionGraph::build(&p, &sites);
        let region = graph.region(9).unwrap();

        let corners: Vec<_> = region.corner_cells.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(corners, vec![(0, 0), (2, 0)]);
        assert_eq!(region.edge_cells.len(), 3);
        assert!(region.interior_cells.is_empty());
        assert!(region.neighbour_ids.is_empty());
    }

    #[test]
    fn test_corners_subset_of_edges() {
        let sites = vec![
            VoronoiSite::new(5, 1, 1),
            VoronoiSite::new(6, 7, 2),
            VoronoiSite::new(7, 3, 7),
            VoronoiSite::new(8, 8, 8),
        ];
        let p = partition(10, 10, &sites, None).unwrap();
        let graph = RegionGraph::build(&p, &sites);

        for region in graph.regions() {
            for corner in &region.corner_cells {
                assert!(region.edge_cells.contains(corner));
            }
            assert!(!region.neighbour_ids.contains(&region.id));
        }
        assert_eq!(
            graph.edges().len() + graph.interiors().len(),
            100,
            "every tile is classified once"
        );
    }

    #[test]
    fn test_unknown_region_is_none() {
        let (p, sites) = two_halves();
        let graph = RegionGraph::build(&p, &sites);
        assert!(graph.region(42).is_none());
    }

    #[test]
    fn test_degenerate_partition_has_no_regions() {
        let p = partition(3, 3, &[], None).unwrap();
        let graph = RegionGraph::build(&p, &[]);
        assert!(graph.regions().is_empty());
        assert!(graph.edges().is_empty());
        assert!(graph.interiors().is_empty());
    }

    #[test]
    fn test_edge_distances() {
        let (mut p, sites) = two_halves();
        let graph = RegionGraph::build(&p, &sites);
        graph.annotate_edge_distances(&mut p);

        assert_eq!(p.get(0, 0).unwrap().distance_to_edge, Some(0.0));
        assert_eq!(p.get(1, 2).unwrap().distance_to_edge, Some(1.0));

        let mut empty = partition(2, 2, &[], None).unwrap();
        RegionGraph::build(&empty, &[]).annotate_edge_distances(&mut empty);
        assert_eq!(empty.get(0, 0).unwrap().distance_to_edge, None);
    }
}
