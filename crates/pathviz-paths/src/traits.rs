use pathviz_core::PosKey;

/// Minimal search interface: endpoints and weighted neighbor enumeration.
pub trait Substrate {
    /// The start key, or `None` when unset or not a passable position.
    fn start(&self) -> Option<PosKey>;

    /// The goal key, or `None` when unset or not a passable position.
    fn goal(&self) -> Option<PosKey>;

    /// Append `(neighbor, edge weight)` pairs of `u` into `buf`. The caller
    /// clears `buf` before calling. Weights are ≥ 1; impassable positions
    /// are never yielded.
    fn neighbors(&self, u: &PosKey, buf: &mut Vec<(PosKey, i32)>);

    /// Cost of the single move from `from` to adjacent `to`, if such a move
    /// exists.
    fn cost(&self, from: &PosKey, to: &PosKey) -> Option<i32> {
        let mut buf = Vec::new();
        self.neighbors(from, &mut buf);
        buf.into_iter()
            .filter(|(v, _)| v == to)
            .map(|(_, w)| w)
            .min()
    }

    /// Total cost of walking `path`, or `None` if two consecutive keys are
    /// not adjacent. An empty or single-key path costs 0.
    fn path_cost(&self, path: &[PosKey]) -> Option<i32> {
        path.windows(2)
            .try_fold(0i32, |acc, pair| Some(acc.saturating_add(self.cost(&pair[0], &pair[1])?)))
    }
}

/// Substrate with an admissible goal-distance estimate, required by A*.
pub trait HeuristicSubstrate: Substrate {
    /// Estimate of the remaining cost from `u` to the goal. Must be
    /// non-negative and should never overestimate.
    fn estimate(&self, u: &PosKey) -> f64;
}
