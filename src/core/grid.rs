//! Character Grid
//!
//! A fixed-size 2D grid of cells owned by one console page. Unlike a
//! terminal grid there is no resizing and no scrolling: the dimensions are
//! set at creation and the cell count is always `width * height`.

use serde::{Deserialize, Serialize};

use super::cell::CharCell;

/// The character grid - a row-major array of cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharGrid {
    cells: Vec<CharCell>,
    width: usize,
    height: usize,
}

impl CharGrid {
    /// Create a grid of `width * height` zeroed cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![CharCell::default(); width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get a reference to a cell, if in bounds.
    pub fn cell(&self, x: usize, y: usize) -> Option<&CharCell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Get a mutable reference to a cell, if in bounds.
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut CharCell> {
        if x < self.width && y < self.height {
            self.cells.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Read a cell. Callers pass pre-validated coordinates.
    pub fn get(&self, x: usize, y: usize) -> CharCell {
        self.cells[y * self.width + x]
    }

    /// Write a cell. Callers pass pre-validated coordinates.
    pub fn set(&mut self, x: usize, y: usize, cell: CharCell) {
        self.cells[y * self.width + x] = cell;
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Iterate over all cells mutably (used by whole-grid attribute ops).
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut CharCell> {
        self.cells.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = CharGrid::new(80, 25);
        assert_eq!(grid.width(), 80);
        assert_eq!(grid.height(), 25);
        assert_eq!(grid.cell(79, 24).copied(), Some(CharCell::default()));
    }

    #[test]
    fn test_grid_cell_access() {
        let mut grid = CharGrid::new(40, 10);

        if let Some(cell) = grid.cell_mut(10, 5) {
            cell.code = b'A';
        }

        assert_eq!(grid.cell(10, 5).unwrap().code, b'A');
        assert_eq!(grid.get(10, 5).code, b'A');
    }

    #[test]
    fn test_grid_out_of_bounds_is_none() {
        let grid = CharGrid::new(40, 10);
        assert!(grid.cell(40, 0).is_none());
        assert!(grid.cell(0, 10).is_none());
        // A wide x on an early row must not alias into the next row.
        assert!(grid.cell(41, 3).is_none());
    }

    #[test]
    fn test_grid_clear() {
        let mut grid = CharGrid::new(4, 4);
        grid.set(2, 2, CharCell::with_colors(b'Z', 14, 1));
        grid.clear();
        assert_eq!(grid.get(2, 2), CharCell::default());
    }
}
