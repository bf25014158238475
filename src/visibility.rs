//! Field of view by raycasting
//!
//! For every tile in the square window around the observer a ray is walked
//! from the tile toward the observer. Transparent tiles on the ray gain one
//! unit of light; an opaque tile zeroes everything the ray lit before it and
//! stops the ray from lighting anything after it. The opaque tile closest to
//! the observer end of the ray is then forced to light 1, so walls at the
//! edge of sight stay visible.
//!
//! The ray direction and step count are both derived from the length of
//! the *target's* position vector (its distance from tile (0, 0)), not from
//! the observer-to-target distance. Far from the origin this makes steps
//! longer than one tile, so thin walls can be skipped. This is the
//! established behaviour of the engine and is kept as is.

use glam::DVec2;

use crate::cell::Cell;
use crate::grid::Grid;

/// Tiles next to the observer that are shown directly when they block vision
const CORNER_PEEK_OFFSETS: [(i32, i32); 5] = [(1, 0), (1, 1), (0, 1), (1, -1), (-1, 1)];

/// Compute the field of view of an observer at `(x, y)`
///
/// Light accumulates on the grid across calls. Every returned tile is
/// marked explored; exploration is never cleared here. The result is
/// recomputed from scratch on every call, in scan order (row by row), with
/// tiles added by the corner peek at the end.
pub fn fov(grid: &mut Grid, radius: i32, x: i32, y: i32) -> Vec<Cell> {
    let mut visible: Vec<(i32, i32)> = Vec::new();

    if let Some(window) = grid.bounds().clip_square(x, y, radius) {
        for (tx, ty) in window.positions() {
            trace_ray(grid, (tx, ty), (x, y));
            if grid.get(tx, ty).is_some_and(Cell::is_lit) {
                visible.push((tx, ty));
            }
        }
    }

    for (dx, dy) in CORNER_PEEK_OFFSETS {
        let (Some(px), Some(py)) = (x.checked_add(dx), y.checked_add(dy)) else {
            continue;
        };
        let pos = (px, py);
        let Some(cell) = grid.get_mut(px, py) else {
            continue;
        };
        if cell.blocks_vision() {
            cell.light = 1;
            if !visible.contains(&pos) {
                visible.push(pos);
            }
        }
    }

    for &(vx, vy) in &visible {
        grid.set_explored(vx, vy);
    }

    tracing::trace!(radius, x, y, visible = visible.len(), "computed field of view");

    visible
        .into_iter()
        .filter_map(|(vx, vy)| grid.get(vx, vy).cloned())
        .collect()
}

/// Walk one ray from `target` toward `observer`, updating light along it
///
/// A target at the origin has a zero-length direction; its ray samples the
/// target tile once and nothing else.
fn trace_ray(grid: &mut Grid, target: (i32, i32), observer: (i32, i32)) {
    let start = DVec2::new(target.0 as f64, target.1 as f64);
    let end = DVec2::new(observer.0 as f64, observer.1 as f64);
    let length = start.length();

    let (step, steps) = if length > 0.0 {
        ((end - start) / length, length.ceil() as usize)
    } else {
        (DVec2::ZERO, 1)
    };

    let mut pos = start;
    let mut amount = 1;
    let mut sampled: Vec<(i32, i32)> = Vec::with_capacity(steps);

    for _ in 0..steps {
        let (cx, cy) = (pos.x.floor() as i32, pos.y.floor() as i32);
        match grid.get(cx, cy).map(Cell::blocks_vision) {
            Some(true) => {
                for &(sx, sy) in &sampled {
                    if let Some(cell) = grid.get_mut(sx, sy) {
                        cell.light = 0;
                    }
                }
                amount = 0;
                sampled.push((cx, cy));
            }
            Some(false) => {
                if let Some(cell) = grid.get_mut(cx, cy) {
                    cell.light = cell.light.saturating_add(amount);
                }
                sampled.push((cx, cy));
            }
            None => {}
        }
        pos += step;
    }

    let nearest_wall = sampled
        .iter()
        .rev()
        .find(|&&(sx, sy)| grid.get(sx, sy).is_some_and(Cell::blocks_vision));
    if let Some(&(wx, wy)) = nearest_wall {
        if let Some(cell) = grid.get_mut(wx, wy) {
            cell.light = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::TerrainType;

    fn grid_with_walls(width: usize, height: usize, walls: &[(i32, i32)]) -> Grid {
        Grid::new(width, height, |x, y| {
            if walls.contains(&(x, y)) {
                TerrainType::new("Wall", "walls").blocking_vision(true)
            } else {
                TerrainType::new("Floor", "floors")
            }
        })
    }

    fn positions(cells: &[Cell]) -> Vec<(i32, i32)> {
        let mut out: Vec<_> = cells.iter().map(|c| (c.x, c.y)).collect();
        out.sort();
        out
    }

    #[test]
    fn test_open_room_fully_lit() {
        let mut grid = grid_with_walls(3, 3, &[]);
        let visible = fov(&mut grid, 1, 1, 1);

        assert_eq!(visible.len(), 9);
        assert!(grid.cells().iter().all(Cell::is_lit));
        assert_eq!(grid.explored_cells().len(), 9);
    }

    #[test]
    fn test_wall_casts_shadow() {
        let mut grid = grid_with_walls(5, 5, &[(2, 2)]);
        let visible = fov(&mut grid, 4, 0, 2);

        let light = |x, y| grid.get(x, y).unwrap().light;
        assert_eq!(light(3, 2), 0);
        assert_eq!(light(4, 2), 0);
        assert_eq!(light(2, 2), 1);
        assert!(light(1, 2) >= 1);

        let seen = positions(&visible);
        assert!(seen.contains(&(2, 2)));
        assert!(!seen.contains(&(3, 2)));
        assert!(!seen.contains(&(4, 2)));
        assert!(!grid.is_explored(4, 2));
    }

    #[test]
    fn test_corner_peek_shows_adjacent_walls() {
        let mut grid = grid_with_walls(5, 5, &[(3, 2), (1, 3), (1, 1)]);
        let visible = fov(&mut grid, 0, 2, 2);

        let seen: Vec<_> = visible.iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(seen, vec![(2, 2), (3, 2), (1, 3)]);
        assert_eq!(grid.get(3, 2).unwrap().light, 1);
        assert!(!grid.is_explored(1, 1));
    }

    #[test]
    fn test_repeat_calls_same_membership() {
        let mut grid = grid_with_walls(8, 8, &[(4, 3), (4, 4), (2, 6)]);
        let first = positions(&fov(&mut grid, 3, 3, 4));
        let second = positions(&fov(&mut grid, 3, 3, 4));
        assert_eq!(first, second);
    }

    #[test]
    fn test_exploration_is_monotonic() {
        let mut grid = grid_with_walls(12, 12, &[(6, 6)]);
        fov(&mut grid, 2, 2, 2);
        let before: Vec<_> = grid.explored_cells().iter().map(|c| (c.x, c.y)).collect();

        fov(&mut grid, 2, 9, 9);
        for (x, y) in before {
            assert!(grid.is_explored(x, y));
        }
    }

    #[test]
    fn test_origin_target_is_lit() {
        let mut grid = grid_with_walls(2, 2, &[]);
        let visible = fov(&mut grid, 0, 0, 0);
        assert_eq!(positions(&visible), vec![(0, 0)]);
        assert_eq!(grid.get(0, 0).unwrap().light, 1);
    }

    #[test]
    fn test_origin_relative_steps_skip_thin_walls() {
        // Target (1, 0) is one unit from the origin, so its ray takes a single
        // sample and never reaches the wall between it and the observer.
        let mut grid = grid_with_walls(10, 1, &[(5, 0)]);
        let seen = positions(&fov(&mut grid, 9, 9, 0));

        assert!(seen.contains(&(1, 0)));
        assert!(!seen.contains(&(2, 0)));
        assert!(!seen.contains(&(4, 0)));
    }

    #[test]
    fn test_extreme_arguments() {
        let mut grid = grid_with_walls(3, 3, &[]);
        assert_eq!(fov(&mut grid, i32::MAX, 1, 1).len(), 9);

        let mut grid = grid_with_walls(3, 3, &[(0, 0)]);
        assert!(fov(&mut grid, 1, i32::MAX, 0).is_empty());
        assert!(fov(&mut grid, 1, i32::MIN, i32::MAX).is_empty());
        assert!(fov(&mut grid, i32::MIN, 1, 1).is_empty());
        assert_eq!(grid.explored_cells().len(), 0);
    }

    #[test]
    fn test_observer_off_grid() {
        let mut grid = grid_with_walls(3, 3, &[]);
        assert!(fov(&mut grid, 1, 10, 10).is_empty());
        assert!(fov(&mut grid, -1, 1, 1).is_empty());
        assert!(grid.explored_cells().is_empty());
    }
}
