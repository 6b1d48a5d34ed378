//! Grid dimensions, cell indexing, and the neighbour offset table.
//!
//! # Layout
//!
//! Cells are stored column-major:
//!
//!   index = x * rows + y      (0 <= x < cols, 0 <= y < rows)
//!
//! so one column (fixed `x`) is a contiguous run of `rows` values.  Every
//! per-cell buffer in the workspace uses this layout; the field kernel
//! schedules one column per task and the steering pass converts indices back
//! with [`GridDims::coords`].

use std::fmt;

use crate::{InflError, InflResult};

/// Largest accepted dimension.  Keeps every coordinate representable as a
/// positive `i32` and exactly representable as an `f32`.
const MAX_DIM: u32 = 1 << 16;

// ── GridDims ──────────────────────────────────────────────────────────────────

/// Fixed `rows × cols` grid size.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    pub rows: u32,
    pub cols: u32,
}

impl GridDims {
    /// 320 × 320, the size the engine was tuned for.
    pub const DEFAULT: GridDims = GridDims { rows: 320, cols: 320 };

    /// Validated constructor.  Both dimensions must be in `1..=65536`.
    pub fn new(rows: u32, cols: u32) -> InflResult<Self> {
        let grid = GridDims { rows, cols };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(self) -> InflResult<()> {
        if self.rows == 0 || self.cols == 0 || self.rows > MAX_DIM || self.cols > MAX_DIM {
            return Err(InflError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
                max:  MAX_DIM,
            });
        }
        Ok(())
    }

    /// Number of cells, `rows * cols`.
    #[inline]
    pub fn cell_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// `true` if `(x, y)` lies inside `[0, cols) × [0, rows)`.
    #[inline]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.cols && (y as u32) < self.rows
    }

    /// Flat index of an in-bounds cell.  No bounds check.
    #[inline]
    pub fn index(self, x: u32, y: u32) -> usize {
        x as usize * self.rows as usize + y as usize
    }

    /// Flat index of `(x, y)`, or `None` when it lies outside the grid.
    #[inline]
    pub fn checked_index(self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y).then(|| self.index(x as u32, y as u32))
    }

    /// Inverse of [`index`](Self::index): `(x, y)` of a flat cell index.
    #[inline]
    pub fn coords(self, index: usize) -> (u32, u32) {
        let rows = self.rows as usize;
        ((index / rows) as u32, (index % rows) as u32)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.cols, self.rows)
    }
}

// ── Neighbour offsets ─────────────────────────────────────────────────────────

/// Integer delta to an adjacent cell.  `+dy` is north.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

/// The 8 neighbour deltas in scan order: N, NE, E, SE, S, SW, W, NW.
///
/// Steering scans this table front to back and only replaces its current best
/// on a strict improvement, so the order decides ties.  Do not reorder.
pub const NEIGHBOR_OFFSETS: [Offset; 8] = [
    Offset { dx:  0, dy:  1 },
    Offset { dx:  1, dy:  1 },
    Offset { dx:  1, dy:  0 },
    Offset { dx:  1, dy: -1 },
    Offset { dx:  0, dy: -1 },
    Offset { dx: -1, dy: -1 },
    Offset { dx: -1, dy:  0 },
    Offset { dx: -1, dy:  1 },
];
