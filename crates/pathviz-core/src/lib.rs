//! Data model for the pathfinding visualizer.
//!
//! This crate provides the types the search engine and the step player are
//! built on: geometry primitives, the shared position key, the editable
//! weighted grid, and the editable node/edge graph with its JSON exchange
//! format.

pub mod error;
pub mod geom;
pub mod graph;
pub mod grid;
pub mod key;

pub use error::{GraphError, GridError};
pub use geom::{Point, Range};
pub use graph::{Graph, GraphEdge, GraphNode};
pub use grid::{DEFAULT_WEIGHT, ENDPOINT_WEIGHT, Grid, MAX_SIDE, Tile, TileKind, WEIGHT_CYCLE};
pub use key::PosKey;
