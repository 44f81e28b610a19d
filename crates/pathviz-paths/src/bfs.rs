use crate::algorithm::Algorithm;
use crate::engine::{SearchResult, SearchState};
use crate::frontier::Fifo;
use crate::traits::Substrate;

/// Breadth-first search from the substrate's start to its goal.
///
/// Edge weights are ignored. Each key is enqueued at most once, the moment
/// it is first discovered, so the returned path has the fewest hops.
pub fn bfs<S: Substrate + ?Sized>(substrate: &S) -> SearchResult {
    SearchState::new(Algorithm::Bfs).explore_unweighted(substrate, Fifo::default())
}
