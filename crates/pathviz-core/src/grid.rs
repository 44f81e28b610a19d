//! A weighted, editable grid for pathfinding.
//!
//! [`Tile`] pairs a [`TileKind`] with an entry weight. [`Grid`] stores a
//! row-major matrix of tiles and keeps exactly one start and one end cell.
//! Edits that would corrupt the endpoints are rejected and reported through
//! their `bool` return value.
//!
//! The start and end tiles weigh [`ENDPOINT_WEIGHT`], so stepping onto the
//! goal is free and a route costs the sum of the cells it passes through.
//! The grid serializes as its rows of tiles and is validated on the way
//! back in through [`Grid::from_rows`].

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::geom::{Point, Range};

/// Weight given to a plain floor tile.
pub const DEFAULT_WEIGHT: i32 = 1;

/// Weight carried by the start and end tiles.
pub const ENDPOINT_WEIGHT: i32 = 0;

/// Weights visited by [`Grid::cycle_weight`], in order.
pub const WEIGHT_CYCLE: [i32; 3] = [1, 5, 10];

/// Largest side accepted by [`Grid::new`]; every cell index of a square of
/// this side fits in an `i32`.
pub const MAX_SIDE: i32 = 46_340;

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    #[default]
    Path,
    Wall,
    Start,
    End,
}

/// A grid cell: its kind and the cost charged for entering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub weight: i32,
}

impl Tile {
    /// Floor tile with the given weight (clamped to at least 1).
    pub const fn path(weight: i32) -> Self {
        Self {
            kind: TileKind::Path,
            weight: if weight < 1 { 1 } else { weight },
        }
    }

    /// Impassable tile.
    pub const fn wall() -> Self {
        Self {
            kind: TileKind::Wall,
            weight: DEFAULT_WEIGHT,
        }
    }

    const fn endpoint(kind: TileKind) -> Self {
        Self {
            kind,
            weight: ENDPOINT_WEIGHT,
        }
    }

    /// The same kind with its weight brought into range for that kind.
    fn normalized(self) -> Self {
        match self.kind {
            TileKind::Path => Self::path(self.weight),
            TileKind::Wall => Self::wall(),
            kind => Self::endpoint(kind),
        }
    }

    /// Whether searches may enter this tile.
    #[inline]
    pub fn is_passable(self) -> bool {
        self.kind != TileKind::Wall
    }

    /// Whether this tile is the start or end cell.
    #[inline]
    pub fn is_endpoint(self) -> bool {
        matches!(self.kind, TileKind::Start | TileKind::End)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::path(DEFAULT_WEIGHT)
    }
}

/// A rows × cols matrix of [`Tile`]s with a start and an end cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Grid {
    tiles: Vec<Tile>,
    rows: i32,
    cols: i32,
    start: Point,
    end: Point,
}

impl Grid {
    /// Create an open grid with the start at `(0, 0)` and the end at
    /// `(rows - 1, cols - 1)`. Both dimensions are clamped to
    /// `1..=`[`MAX_SIDE`].
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.clamp(1, MAX_SIDE);
        let cols = cols.clamp(1, MAX_SIDE);
        let len = rows.unsigned_abs() as usize * cols.unsigned_abs() as usize;
        let mut grid = Self {
            tiles: vec![Tile::default(); len],
            rows,
            cols,
            start: Point::ZERO,
            end: Point::cell(rows - 1, cols - 1),
        };
        // Start wins on a 1×1 grid.
        grid.place(grid.end, TileKind::End);
        grid.place(grid.start, TileKind::Start);
        grid
    }

    /// Build a grid from rows of tiles.
    ///
    /// The matrix must be rectangular and non-empty and hold exactly one
    /// start and one end tile. Weights are clamped per kind: floor to at
    /// least 1, endpoints to [`ENDPOINT_WEIGHT`].
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(GridError::Empty);
        }
        let too_large = || GridError::TooLarge {
            rows: rows.len(),
            cols,
        };
        let (Ok(r), Ok(c)) = (i32::try_from(rows.len()), i32::try_from(cols)) else {
            return Err(too_large());
        };
        if r.checked_mul(c).is_none() {
            return Err(too_large());
        }

        let mut tiles = Vec::with_capacity(rows.len() * cols);
        let (mut starts, mut ends) = (Vec::new(), Vec::new());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: y,
                    len: row.len(),
                    expected: cols,
                });
            }
            for (x, tile) in row.iter().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match tile.kind {
                    TileKind::Start => starts.push(p),
                    TileKind::End => ends.push(p),
                    _ => {}
                }
                tiles.push(tile.normalized());
            }
        }
        let (&[start], &[end]) = (starts.as_slice(), ends.as_slice()) else {
            return Err(if starts.len() != 1 {
                GridError::Endpoint {
                    kind: "start",
                    count: starts.len(),
                }
            } else {
                GridError::Endpoint {
                    kind: "end",
                    count: ends.len(),
                }
            });
        };
        Ok(Self {
            tiles,
            rows: r,
            cols: c,
            start,
            end,
        })
    }

    /// The tiles as a rows × cols matrix.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.tiles
            .chunks(self.cols.unsigned_abs() as usize)
            .map(<[Tile]>::to_vec)
            .collect()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y * self.cols + p.x) as usize)
        } else {
            None
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The rectangle covered by the grid (x = column, y = row).
    pub fn range(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// The start cell.
    pub fn start(&self) -> Point {
        self.start
    }

    /// The end cell.
    pub fn end(&self) -> Point {
        self.end
    }

    /// The tile at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Tile> {
        self.index(p).and_then(|i| self.tiles.get(i)).copied()
    }

    /// Whether `p` is inside the grid and not a wall.
    pub fn is_passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Tile::is_passable)
    }

    /// Entry cost of `p`, or `None` for walls and out-of-bounds points.
    pub fn weight(&self, p: Point) -> Option<i32> {
        self.at(p).filter(|t| t.is_passable()).map(|t| t.weight)
    }

    fn tile_mut(&mut self, p: Point) -> Option<&mut Tile> {
        let i = self.index(p)?;
        self.tiles.get_mut(i)
    }

    /// Turn a floor tile into a wall or a wall back into weight-1 floor.
    ///
    /// Returns `false` (and changes nothing) for endpoints and points
    /// outside the grid.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        let Some(tile) = self.tile_mut(p) else {
            return false;
        };
        match tile.kind {
            TileKind::Start | TileKind::End => false,
            TileKind::Wall => {
                *tile = Tile::path(DEFAULT_WEIGHT);
                true
            }
            TileKind::Path => {
                *tile = Tile::wall();
                true
            }
        }
    }

    /// Advance a floor tile's weight through [`WEIGHT_CYCLE`]; weights not in
    /// the cycle restart at its first entry.
    ///
    /// Returns `false` for endpoints, walls and points outside the grid.
    pub fn cycle_weight(&mut self, p: Point) -> bool {
        let Some(tile) = self.tile_mut(p).filter(|t| t.kind == TileKind::Path) else {
            return false;
        };
        let next = match WEIGHT_CYCLE.iter().position(|&w| w == tile.weight) {
            Some(pos) => WEIGHT_CYCLE[(pos + 1) % WEIGHT_CYCLE.len()],
            None => WEIGHT_CYCLE[0],
        };
        tile.weight = next;
        true
    }

    /// Set a floor tile's weight, clamped to at least 1.
    ///
    /// Returns `false` for endpoints, walls and points outside the grid.
    pub fn set_weight(&mut self, p: Point, weight: i32) -> bool {
        let Some(tile) = self.tile_mut(p).filter(|t| t.kind == TileKind::Path) else {
            return false;
        };
        *tile = Tile::path(weight);
        true
    }

    /// Move the start cell to `p`.
    ///
    /// Rejected when `p` is outside the grid, a wall, or the end cell.
    pub fn set_start(&mut self, p: Point) -> bool {
        if p == self.start || p == self.end || !self.is_passable(p) {
            return false;
        }
        self.vacate(self.start);
        self.place(p, TileKind::Start);
        self.start = p;
        true
    }

    /// Move the end cell to `p`.
    ///
    /// Rejected when `p` is outside the grid, a wall, or the start cell.
    pub fn set_end(&mut self, p: Point) -> bool {
        if p == self.end || p == self.start || !self.is_passable(p) {
            return false;
        }
        self.vacate(self.end);
        self.place(p, TileKind::End);
        self.end = p;
        true
    }

    /// The cell an endpoint leaves becomes plain floor; whatever weight it
    /// had before the endpoint arrived is not restored.
    fn vacate(&mut self, p: Point) {
        if let Some(tile) = self.tile_mut(p) {
            *tile = Tile::default();
        }
    }

    fn place(&mut self, p: Point, kind: TileKind) {
        if let Some(tile) = self.tile_mut(p) {
            *tile = Tile::endpoint(kind);
        }
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<Tile>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}
