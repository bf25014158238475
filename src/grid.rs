//! Tile storage and exploration mask
//!
//! Reads outside the grid return `None` and writes outside the grid are
//! ignored, so ray walkers can probe past the edge without extra checks.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::terrain::TerrainType;

/// Axis-aligned rectangle of tile coordinates
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in tiles
    pub w: i32,
    /// Height in tiles
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive square `[cx - radius, cx + radius] x [cy - radius, cy + radius]`
    ///
    /// Saturates at the edges of the `i32` range.
    pub fn around(cx: i32, cy: i32, radius: i32) -> Self {
        let side = radius.saturating_mul(2).saturating_add(1);
        Self::new(cx.saturating_sub(radius), cy.saturating_sub(radius), side, side)
    }

    /// The part of `Rect::around(cx, cy, radius)` that lies inside `self`
    ///
    /// Unlike `around` followed by `intersect`, this is exact for any radius.
    pub fn clip_square(&self, cx: i32, cy: i32, radius: i32) -> Option<Rect> {
        let r = i64::from(radius);
        let x0 = (i64::from(cx) - r).max(i64::from(self.x));
        let y0 = (i64::from(cy) - r).max(i64::from(self.y));
        let x1 = (i64::from(cx) + r + 1).min(i64::from(self.x) + i64::from(self.w));
        let y1 = (i64::from(cy) + r + 1).min(i64::from(self.y) + i64::from(self.h));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        // Inside self, so every value fits back into i32
        Some(Rect::new(x0 as i32, y0 as i32, (x1 - x0) as i32, (y1 - y0) as i32))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.w)
            && y >= self.y
            && y < self.y.saturating_add(self.h)
    }

    /// Overlap of two rectangles, `None` if they do not overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.x.saturating_add(self.w).min(other.x.saturating_add(other.w));
        let y1 = self.y.saturating_add(self.h).min(other.y.saturating_add(other.h));
        let rect = Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0));
        (!rect.is_empty()).then_some(rect)
    }

    /// All positions inside the rectangle, row by row
    pub fn positions(&self) -> impl Iterator<Item = (i32, i32)> {
        let Rect { x, y, w, h } = *self;
        (y..y.saturating_add(h.max(0)))
            .flat_map(move |row| (x..x.saturating_add(w.max(0))).map(move |col| (col, row)))
    }
}

/// Row-major grid of tiles with an exploration mask of the same size
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    explored: Vec<bool>,
}

impl Grid {
    /// Allocate a grid, asking `terrain_at` for the terrain of every tile
    ///
    /// Tiles are visited row by row, left to right.
    pub fn new<F>(width: usize, height: usize, mut terrain_at: F) -> Self
    where
        F: FnMut(i32, i32) -> TerrainType,
    {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(Cell::new(x, y, terrain_at(x, y)));
            }
        }

        Self {
            width,
            height,
            cells,
            explored: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The whole grid as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Tile at `(x, y)`, `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable tile at `(x, y)`, `None` outside the grid
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Store `cell` at its own coordinates; ignored outside the grid
    pub fn set(&mut self, cell: Cell) {
        if let Some(i) = self.index(cell.x, cell.y) {
            self.cells[i] = cell;
        }
    }

    /// All tiles, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Tiles whose terrain satisfies `predicate`
    pub fn cells_matching<P>(&self, mut predicate: P) -> Vec<&Cell>
    where
        P: FnMut(&TerrainType) -> bool,
    {
        self.cells.iter().filter(|c| predicate(&c.terrain)).collect()
    }

    /// Mark `(x, y)` as explored; ignored outside the grid
    pub fn set_explored(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.explored[i] = true;
        }
    }

    /// Whether `(x, y)` was ever explored; `false` outside the grid
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |i| self.explored[i])
    }

    pub fn set_all_explored(&mut self) {
        self.explored.fill(true);
    }

    /// Every explored tile, row-major
    pub fn explored_cells(&self) -> Vec<&Cell> {
        self.cells
            .iter()
            .zip(&self.explored)
            .filter_map(|(cell, &explored)| explored.then_some(cell))
            .collect()
    }

    /// Exploration mask, row-major
    pub fn explored_mask(&self) -> &[bool] {
        &self.explored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_grid(width: usize, height: usize) -> Grid {
        Grid::new(width, height, |_, _| TerrainType::new("Floor", "floors"))
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = floor_grid(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.explored_mask().len(), 12);
        assert_eq!(grid.get(3, 2).map(|c| (c.x, c.y)), Some((3, 2)));
    }

    #[test]
    fn test_out_of_range_reads_are_none() {
        let grid = floor_grid(4, 3);
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 3).is_none());
        assert!(!grid.is_explored(10, 10));
    }

    #[test]
    fn test_set_cell() {
        let mut grid = floor_grid(4, 3);
        grid.set(Cell::new(1, 1, TerrainType::new("Wall", "walls")));
        assert_eq!(grid.get(1, 1).unwrap().terrain.name, "Wall");

        // Silently dropped
        grid.set(Cell::new(9, 9, TerrainType::new("Wall", "walls")));
        assert_eq!(grid.cells_matching(|t| t.name == "Wall").len(), 1);
    }

    #[test]
    fn test_exploration() {
        let mut grid = floor_grid(3, 3);
        grid.set_explored(0, 0);
        grid.set_explored(2, 1);
        grid.set_explored(-1, 5);

        assert!(grid.is_explored(0, 0));
        assert!(!grid.is_explored(1, 0));
        let explored: Vec<_> = grid.explored_cells().iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(explored, vec![(0, 0), (2, 1)]);

        grid.set_all_explored();
        assert_eq!(grid.explored_cells().len(), 9);
    }

    #[test]
    fn test_rect_intersect() {
        let grid = floor_grid(5, 5);
        let window = Rect::around(0, 4, 2).intersect(&grid.bounds()).unwrap();
        assert_eq!(window, Rect::new(0, 2, 3, 3));
        assert_eq!(window.positions().count(), 9);
        assert_eq!(window.positions().next(), Some((0, 2)));

        assert!(Rect::around(20, 20, 1).intersect(&grid.bounds()).is_none());
        assert!(Rect::around(1, 1, -1).is_empty());
    }

    #[test]
    fn test_rect_extreme_coordinates() {
        let grid = floor_grid(3, 3);
        let bounds = grid.bounds();

        let huge = Rect::around(1, 1, i32::MAX);
        assert_eq!(huge.w, i32::MAX);
        assert!(huge.contains(0, 0));
        assert!(huge.intersect(&bounds).is_some());
        assert!(Rect::around(i32::MAX, 0, 1).intersect(&bounds).is_none());
        assert!(!Rect::around(i32::MIN, i32::MIN, 2).contains(0, 0));

        assert_eq!(bounds.clip_square(1, 1, i32::MAX), Some(bounds));
        assert_eq!(bounds.clip_square(i32::MAX, 0, 1), None);
        assert_eq!(bounds.clip_square(-5, i32::MAX, i32::MAX), Some(bounds));
        assert_eq!(bounds.clip_square(i32::MIN, 0, i32::MAX), None);
        assert_eq!(bounds.clip_square(0, 4, 2), Some(Rect::new(0, 2, 3, 1)));
        assert_eq!(bounds.clip_square(1, 1, -1), None);
    }
}
