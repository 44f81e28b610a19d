//! Search engine for the pathfinding visualizer.
//!
//! Four interchangeable strategies run over either a weighted grid or a
//! node/edge graph through one [`Substrate`] interface:
//!
//! - **BFS** ([`bfs`]): FIFO frontier, fewest hops
//! - **DFS** ([`dfs`]): LIFO frontier, any path
//! - **Dijkstra** ([`dijkstra`]): lazy-deletion min-heap on accumulated cost
//! - **A\*** ([`astar`]): the same heap ordered by cost plus estimate
//!
//! Every run returns a [`SearchResult`] holding the visit order, the path,
//! per-key metadata and a [`Trace`] of events and frontier snapshots that a
//! player can step through.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Substrate`] | BFS, DFS, Dijkstra |
//! | [`HeuristicSubstrate`] : [`Substrate`] | A* |

mod algorithm;
mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod engine;
mod frontier;
mod substrate;
mod trace;
mod traits;

pub use algorithm::{Algorithm, UnknownAlgorithm};
pub use astar::astar;
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::dijkstra;
pub use distance::{euclidean, manhattan};
pub use engine::{NodeMeta, SearchResult, reconstruct};
pub use substrate::{GraphSubstrate, GridSubstrate};
pub use trace::{Event, FrontierItem, PseudoLine, Rank, Trace};
pub use traits::{HeuristicSubstrate, Substrate};
