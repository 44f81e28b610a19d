//! Cell coordinates and rectangular board areas.
//!
//! A [`Point`] stores the column in `x` and the row in `y`. Points compare
//! row first, so sorting a set of cells gives the same order as scanning
//! the board line by line.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer cell coordinate. `x` counts columns to the right, `y` rows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point for the cell at `row`, `col`.
    #[inline]
    pub const fn cell(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.y
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.x
    }

    /// Orthogonal neighbours, clockwise from the right: right, down, left, up.
    /// Search expansion order depends on this.
    pub fn neighbors_4(self) -> [Point; 4] {
        let Self { x, y } = self;
        [
            Self::new(x + 1, y),
            Self::new(x, y + 1),
            Self::new(x - 1, y),
            Self::new(x, y - 1),
        ]
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    /// `(row,col)`, as printed in search logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.col())
    }
}

/// Rectangular block of cells with an inclusive `min` corner and an
/// exclusive `max` corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Build from any two opposite corners; the coordinates are sorted per axis.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    fn cols(self) -> usize {
        usize::try_from(self.max.x - self.min.x).unwrap_or(0)
    }

    fn rows(self) -> usize {
        usize::try_from(self.max.y - self.min.y).unwrap_or(0)
    }

    /// Number of cells covered.
    pub fn len(self) -> usize {
        self.cols() * self.rows()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Cells in scan order: left to right, then top to bottom.
    pub fn iter(self) -> RangeIter {
        RangeIter { range: self, next: 0 }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Scan-order iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.range.len() {
            return None;
        }
        let cols = self.range.cols();
        let (dy, dx) = (self.next / cols, self.next % cols);
        self.next += 1;
        Some(Point::new(self.range.min.x + dx as i32, self.range.min.y + dy as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.range.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}
