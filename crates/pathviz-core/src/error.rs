//! Typed errors for grid and graph import.

/// Failure to read a graph from its JSON exchange format.
#[derive(Debug)]
pub enum GraphError {
    /// The input was not valid JSON.
    Json(serde_json::Error),
    /// A required top-level array was absent or not an array.
    MissingField(&'static str),
    /// A node or edge carried an id/endpoint that cannot be read as text.
    InvalidId { item: &'static str, index: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed graph JSON: {e}"),
            Self::MissingField(name) => write!(f, "graph JSON lacks a `{name}` array"),
            Self::InvalidId { item, index } => {
                write!(f, "{item} #{index} has an id that is neither text nor a number")
            }
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// A tile matrix that cannot form a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or a row with no tiles.
    Empty,
    /// Row `row` has `len` tiles where `expected` were required.
    Ragged { row: usize, len: usize, expected: usize },
    /// The cell count does not fit the grid's index space.
    TooLarge { rows: usize, cols: usize },
    /// There must be exactly one tile of this kind; `count` were found.
    Endpoint { kind: &'static str, count: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("grid has no cells"),
            Self::Ragged { row, len, expected } => {
                write!(f, "grid row {row} has {len} tiles, expected {expected}")
            }
            Self::TooLarge { rows, cols } => write!(f, "grid of {rows}x{cols} cells is too large"),
            Self::Endpoint { kind, count } => {
                write!(f, "grid needs exactly one {kind} tile, found {count}")
            }
        }
    }
}

impl std::error::Error for GridError {}
