//! [`PosKey`]: the single comparable identity shared by grid cells and graph
//! nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Identity of a searchable position.
///
/// Grid cells and graph nodes normalize to this one key so that the search
/// engine, the trace and the player never care which substrate produced
/// them. Cells order row-major and sort before nodes; nodes order by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosKey {
    /// A grid cell.
    Cell(Point),
    /// A graph node, by id.
    Node(String),
}

impl PosKey {
    /// Key for the grid cell at `(row, col)`.
    #[inline]
    pub const fn cell(row: i32, col: i32) -> Self {
        Self::Cell(Point::cell(row, col))
    }

    /// Key for the graph node with the given id.
    #[inline]
    pub fn node(id: impl Into<String>) -> Self {
        Self::Node(id.into())
    }

    /// The grid position, if this is a cell key.
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Cell(p) => Some(*p),
            Self::Node(_) => None,
        }
    }

    /// The node id, if this is a node key.
    pub fn as_node(&self) -> Option<&str> {
        match self {
            Self::Cell(_) => None,
            Self::Node(id) => Some(id),
        }
    }
}

impl From<Point> for PosKey {
    fn from(p: Point) -> Self {
        Self::Cell(p)
    }
}

impl fmt::Display for PosKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(p) => write!(f, "{p}"),
            Self::Node(id) => f.write_str(id),
        }
    }
}
