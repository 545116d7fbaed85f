use serde::{Deserialize, Serialize};

use crate::error::{TerrainError, TerrainResult};

/// A dense, row-major 2D grid.
///
/// Cell `(x, y)` lives at index `y * width + x`. The shape is fixed at
/// construction; nothing in the public API can resize a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell, row by row.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> TerrainResult<Self> {
        let len = match width.checked_mul(height) {
            Some(len) if len > 0 => len,
            _ => return Err(TerrainError::InvalidDimensions { width, height }),
        };
        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if `(x, y)` addresses a cell.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if self.contains(x, y) {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if self.contains(x, y) {
            self.cells.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    /// Iterate `(x, y, &cell)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i % width, i / width, cell))
    }

    /// Build a grid of the same shape by mapping every cell.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Check that a deserialized grid is internally consistent.
    pub fn validate(&self) -> TerrainResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height) != Some(self.cells.len()) {
            return Err(TerrainError::ShapeMismatch {
                expected: self.dims(),
                found: (self.cells.len(), 1),
            });
        }
        Ok(())
    }

    /// Fail unless `other` has the same shape as `self`.
    pub fn ensure_same_shape<U>(&self, other: &Grid<U>) -> TerrainResult<()> {
        if self.dims() == other.dims() {
            Ok(())
        } else {
            Err(TerrainError::ShapeMismatch {
                expected: self.dims(),
                found: other.dims(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let grid = Grid::from_fn(3, 2, |x, y| x + 10 * y).unwrap();
        assert_eq!(grid.cells(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid.get(2, 1), Some(&12));
    }

    #[test]
    fn out_of_range_is_none() {
        let grid = Grid::from_fn(2, 2, |_, _| 0u8).unwrap();
        assert!(grid.get(2, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn zero_sized_rejected() {
        assert!(Grid::from_fn(0, 3, |_, _| 0).is_err());
        assert!(Grid::from_fn(3, 0, |_, _| 0).is_err());
    }

    #[test]
    fn overflowing_area_rejected() {
        assert_eq!(
            Grid::from_fn(usize::MAX, 4, |_, _| 0u8),
            Err(TerrainError::InvalidDimensions {
                width: usize::MAX,
                height: 4
            })
        );
    }

    #[test]
    fn iter_cells_yields_coordinates() {
        let grid = Grid::from_fn(2, 2, |x, y| (x, y)).unwrap();
        for (x, y, cell) in grid.iter_cells() {
            assert_eq!(*cell, (x, y));
        }
    }

    #[test]
    fn shape_mismatch_detected() {
        let a = Grid::from_fn(2, 3, |_, _| 0.0).unwrap();
        let b = Grid::from_fn(3, 2, |_, _| 0.0).unwrap();
        assert_eq!(
            a.ensure_same_shape(&b),
            Err(TerrainError::ShapeMismatch {
                expected: (2, 3),
                found: (3, 2)
            })
        );
    }

    #[test]
    fn validate_catches_truncated_cells() {
        let good: Grid<u8> = toml::from_str("width = 2\nheight = 2\ncells = [1, 2, 3, 4]").unwrap();
        assert!(good.validate().is_ok());
        let short: Grid<u8> = toml::from_str("width = 2\nheight = 2\ncells = [1, 2, 3]").unwrap();
        assert!(short.validate().is_err());
    }
}
