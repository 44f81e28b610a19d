use crate::algorithm::Algorithm;
use crate::engine::{SearchResult, SearchState};
use crate::frontier::MinQueue;
use crate::traits::Substrate;

/// Dijkstra's algorithm from the substrate's start to its goal.
///
/// The frontier is a lazy-deletion min-heap keyed by accumulated cost:
/// every successful relaxation pushes a new entry and superseded ones are
/// discarded when they surface.
pub fn dijkstra<S: Substrate + ?Sized>(substrate: &S) -> SearchResult {
    SearchState::new(Algorithm::Dijkstra).explore_weighted(substrate, MinQueue::default(), |_| None)
}
