//! Grid coordinates and the sparse live-cell set

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A position on the unbounded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Shift the cell by the given offset, clamped to the representable range
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Shift the cell, or `None` if the result falls outside `i64`
    pub const fn checked_offset(self, dx: i64, dy: i64) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

impl From<(i64, i64)> for Cell {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// All currently alive cells. Absence means dead.
pub type LiveSet = HashSet<Cell>;

/// Minimal axis-aligned rectangle containing a set of cells (inclusive on every edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn width(&self) -> u64 {
        self.max_x.abs_diff(self.min_x).saturating_add(1)
    }

    pub fn height(&self) -> u64 {
        self.max_y.abs_diff(self.min_y).saturating_add(1)
    }

    /// Number of cells covered, saturating at `u64::MAX`
    pub fn area(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_x..=self.max_x).contains(&cell.x) && (self.min_y..=self.max_y).contains(&cell.y)
    }

    /// Center of the rectangle, rounded toward the top-left
    pub fn center(&self) -> Cell {
        Cell::new(
            self.min_x.saturating_add_unsigned(self.max_x.abs_diff(self.min_x) / 2),
            self.min_y.saturating_add_unsigned(self.max_y.abs_diff(self.min_y) / 2),
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x {}..={}, y {}..={} ({}x{})",
            self.min_x,
            self.max_x,
            self.min_y,
            self.max_y,
            self.width(),
            self.height()
        )
    }
}
