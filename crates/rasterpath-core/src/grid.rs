//! The [`Grid`] type: an owned, rectangular, row-major 2D array.
//!
//! Cells are addressed by [`Point`] `(row, col)` or by their linear index
//! `row * width + col`. The two encodings are reversible through
//! [`Grid::idx`] and [`Grid::point`].

use std::fmt;
use std::ops::Index;

use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors raised when constructing a grid from untrusted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The grid would have no rows or no columns.
    Empty,
    /// A row's length differs from the first row's length.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The number of cells does not equal `height * width`.
    SizeMismatch { expected: usize, found: usize },
    /// A dimension does not fit the signed coordinate space.
    TooLarge,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid has no cells"),
            GridError::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            GridError::SizeMismatch { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            GridError::TooLarge => write!(f, "grid dimensions exceed coordinate range"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular `height × width` array of `T` stored in row-major order.
///
/// A grid always has at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with `value`.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds `i32::MAX`.
    pub fn new(height: usize, width: usize, value: T) -> Self {
        assert!(
            check_dims(height, width).is_ok(),
            "invalid grid dimensions {height}x{width}"
        );
        Self {
            cells: vec![value; height * width],
            width,
            height,
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid from a row-major cell vector.
    pub fn from_vec(height: usize, width: usize, cells: Vec<T>) -> Result<Self, GridError> {
        check_dims(height, width)?;
        if cells.len() != height * width {
            return Err(GridError::SizeMismatch {
                expected: height * width,
                found: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Build a grid from a sequence of rows, rejecting ragged input.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for (i, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row);
            let found = cells.len() - before;
            if i == 0 {
                width = found;
            } else if found != width {
                return Err(GridError::Ragged {
                    row: i,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }
        Self::from_vec(height, width, cells)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The range `[0, height) × [0, width)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.height as i32, self.width as i32)
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.col >= 0 && (p.row as usize) < self.height && (p.col as usize) < self.width
    }

    /// Linear index of `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.width + p.col as usize)
    }

    /// Point for a linear index. `idx` must be below [`len`](Self::len).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        debug_assert!(idx < self.cells.len());
        Point::new((idx / self.width) as i32, (idx % self.width) as i32)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Row-major slice of all cells.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, v)| (self.point(i), v))
    }

    /// A new grid of the same shape with `f` applied to every cell.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: PartialEq> Grid<T> {
    /// Number of cells equal to `value`.
    pub fn count(&self, value: &T) -> usize {
        self.cells.iter().filter(|c| *c == value).count()
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `p` is outside the grid.
    fn index(&self, p: Point) -> &T {
        match self.idx(p) {
            Some(i) => &self.cells[i],
            None => panic!("point {p} outside grid {}", self.bounds()),
        }
    }
}

fn check_dims(height: usize, width: usize) -> Result<(), GridError> {
    if height == 0 || width == 0 {
        return Err(GridError::Empty);
    }
    if height > i32::MAX as usize || width > i32::MAX as usize {
        return Err(GridError::TooLarge);
    }
    Ok(())
}
