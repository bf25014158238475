//! Writing terrain into the grid
//!
//! Plain initialization asks a [`TerrainStrategy`] for every tile.
//! Region-driven population gives every region one terrain group, fills
//! interior tiles from that group and blends the groups of neighbouring
//! regions along region edges.

use std::collections::HashMap;

use crate::cell::Cell;
use crate::error::{Result, TileMapError};
use crate::grid::Grid;
use crate::random::{pick_index, RandomSource};
use crate::terrain::{filter_group, TerrainStrategy, TerrainType};

use super::partition::VoronoiSite;
use super::regions::RegionGraph;

/// Build a `width x height` grid with terrain chosen tile by tile
///
/// Tiles whose palette is empty receive [`TerrainType::void`].
pub fn populate_default(
    width: usize,
    height: usize,
    strategy: &dyn TerrainStrategy,
    rng: &mut dyn RandomSource,
) -> Grid {
    Grid::new(width, height, |x, y| {
        let palette = strategy.select_palette(x, y);
        let mut terrain = strategy
            .choose_terrain(&palette, x, y, rng)
            .unwrap_or_else(TerrainType::void);
        terrain.vary_appearance(rng);
        terrain
    })
}

/// Give every site one group drawn uniformly from `groups`, in site order
///
/// # Errors
///
/// Returns `InvalidConfig` if `groups` is empty.
pub fn assign_groups<'g, S>(
    sites: &[VoronoiSite],
    groups: &'g [S],
    rng: &mut dyn RandomSource,
) -> Result<HashMap<i32, &'g str>>
where
    S: AsRef<str>,
{
    if groups.is_empty() {
        return Err(TileMapError::InvalidConfig(
            "at least one terrain group is required".into(),
        ));
    }

    let mut assigned = HashMap::with_capacity(sites.len());
    for site in sites {
        if let Some(i) = pick_index(rng, groups.len()) {
            assigned.insert(site.id, groups[i].as_ref());
        }
    }
    Ok(assigned)
}

/// Overwrite region tiles with terrain from `palette`
///
/// Interior tiles draw from their region's group; a tile is left untouched
/// when that group has no palette entries. Edge tiles draw from the union
/// of their own group and the groups of every neighbouring region, or from
/// their own group alone when they only border the grid edge.
///
/// Each group enters an edge tile's candidate list once, however many
/// neighbouring regions share it, so a shared group is not weighted higher.
pub fn populate_regions(
    grid: &mut Grid,
    graph: &RegionGraph,
    region_groups: &HashMap<i32, &str>,
    palette: &[TerrainType],
    rng: &mut dyn RandomSource,
) {
    let group_of = |id: i32| region_groups.get(&id).copied();

    for region in graph.regions() {
        let Some(group) = group_of(region.id) else {
            continue;
        };

        let interior_palette = filter_group(palette, group);
        for cell in &region.interior_cells {
            place(grid, cell.x, cell.y, &interior_palette, rng);
        }

        for cell in &region.edge_cells {
            if cell.neighbour_region_ids.is_empty() {
                place(grid, cell.x, cell.y, &interior_palette, rng);
                continue;
            }

            let mut blended_groups = vec![group];
            for &neighbour in &cell.neighbour_region_ids {
                if let Some(other) = group_of(neighbour) {
                    if !blended_groups.contains(&other) {
                        blended_groups.push(other);
                    }
                }
            }
            let blended: Vec<&TerrainType> = blended_groups
                .iter()
                .flat_map(|g| filter_group(palette, g))
                .collect();
            place(grid, cell.x, cell.y, &blended, rng);
        }
    }
}

fn place(grid: &mut Grid, x: i32, y: i32, candidates: &[&TerrainType], rng: &mut dyn RandomSource) {
    let Some(i) = pick_index(rng, candidates.len()) else {
        return;
    };
    let mut terrain = candidates[i].clone();
    terrain.vary_appearance(rng);
    grid.set(Cell::new(x, y, terrain));
}
