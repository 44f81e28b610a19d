//! The shared search loop.
//!
//! All four strategies run through [`SearchState`]: BFS and DFS through the
//! unweighted driver (hop count fixed at discovery, FIFO or LIFO frontier),
//! Dijkstra and A* through the weighted driver (lazy-deletion priority
//! queue, stale entries skipped on pop). Every driver records a trace as it
//! goes and stops when the goal is removed from the frontier.

use std::collections::{BTreeMap, HashMap};

use pathviz_core::PosKey;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::frontier::{Entry, Frontier};
use crate::trace::{Event, FrontierItem, Rank, Recorder, Trace};
use crate::traits::Substrate;

/// Per-key debug data gathered during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMeta {
    /// Best known cost (hop count for BFS/DFS).
    pub cost: i32,
    /// Heuristic estimate (A* only).
    pub heuristic: Option<f64>,
    /// Predecessor on the best known path; `None` for the start.
    pub parent: Option<PosKey>,
}

/// Everything one engine invocation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub algorithm: Algorithm,
    /// Keys in the order they were visited.
    pub visited_order: Vec<PosKey>,
    /// Start to goal inclusive; empty when the goal was not reached.
    pub shortest_path: Vec<PosKey>,
    /// The engine's cost for the goal when it was reached.
    pub best_cost: Option<i32>,
    pub trace: Trace,
    pub meta: BTreeMap<PosKey, NodeMeta>,
}

impl SearchResult {
    /// Whether the goal was reached.
    pub fn found(&self) -> bool {
        !self.shortest_path.is_empty()
    }

    /// Trace for a run that could not start: one explanatory event, no
    /// visits.
    fn missing_endpoints(algorithm: Algorithm) -> Self {
        let mut recorder = Recorder::default();
        recorder.record(Event::MissingEndpoints);
        Self {
            algorithm,
            visited_order: Vec::new(),
            shortest_path: Vec::new(),
            best_cost: None,
            trace: recorder.finish(),
            meta: BTreeMap::new(),
        }
    }
}

/// Mutable state owned by exactly one engine invocation.
pub(crate) struct SearchState {
    algorithm: Algorithm,
    best: HashMap<PosKey, i32>,
    parent: HashMap<PosKey, PosKey>,
    estimates: HashMap<PosKey, f64>,
    visited: Vec<PosKey>,
    recorder: Recorder,
    // scratch buffer for neighbor queries
    nbuf: Vec<(PosKey, i32)>,
}

impl SearchState {
    pub(crate) fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            best: HashMap::new(),
            parent: HashMap::new(),
            estimates: HashMap::new(),
            visited: Vec::new(),
            recorder: Recorder::default(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Breadth- or depth-first exploration depending on `frontier`.
    ///
    /// A key is marked seen when it is discovered, so it enters the
    /// frontier at most once and its hop count never changes. Edge weights
    /// are ignored.
    pub(crate) fn explore_unweighted<S, F>(mut self, substrate: &S, mut frontier: F) -> SearchResult
    where
        S: Substrate + ?Sized,
        F: Frontier,
    {
        let (Some(start), Some(goal)) = (substrate.start(), substrate.goal()) else {
            return SearchResult::missing_endpoints(self.algorithm);
        };
        self.recorder.record(Event::Start {
            algorithm: self.algorithm,
            key: start.clone(),
        });
        self.best.insert(start.clone(), 0);
        frontier.push(start.clone(), 0, 0.0);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(current) = frontier.pop() {
            self.visit(&current.key);
            if current.key == goal {
                found = true;
                self.snapshot(&frontier);
                break;
            }

            nbuf.clear();
            substrate.neighbors(&current.key, &mut nbuf);
            for (next, _) in nbuf.drain(..) {
                if self.best.contains_key(&next) {
                    continue;
                }
                let depth = current.g + 1;
                self.best.insert(next.clone(), depth);
                self.parent.insert(next.clone(), current.key.clone());
                let event = match self.algorithm {
                    Algorithm::Dfs => Event::Push { key: next.clone() },
                    _ => Event::Enqueue { key: next.clone() },
                };
                self.recorder.record(event);
                frontier.push(next, depth, 0.0);
            }
            self.snapshot(&frontier);
        }

        self.nbuf = nbuf;
        self.finish(&start, &goal, found)
    }

    /// Best-first exploration ordered by `g + estimate(key)`.
    ///
    /// Relaxing a key pushes a fresh entry; older entries for it stay in
    /// the queue and are skipped when popped because their `g` no longer
    /// matches the cost table.
    pub(crate) fn explore_weighted<S, F, H>(
        mut self,
        substrate: &S,
        mut frontier: F,
        estimate: H,
    ) -> SearchResult
    where
        S: Substrate + ?Sized,
        F: Frontier,
        H: Fn(&PosKey) -> Option<f64>,
    {
        let (Some(start), Some(goal)) = (substrate.start(), substrate.goal()) else {
            return SearchResult::missing_endpoints(self.algorithm);
        };
        self.recorder.record(Event::Start {
            algorithm: self.algorithm,
            key: start.clone(),
        });
        let h0 = estimate(&start);
        if let Some(h) = h0 {
            self.estimates.insert(start.clone(), h);
        }
        self.best.insert(start.clone(), 0);
        frontier.push(start.clone(), 0, h0.unwrap_or(0.0));

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = false;

        while let Some(current) = frontier.pop() {
            if !self.is_current(&current) {
                log::trace!(
                    "skip stale {} (g={}), {} queued",
                    current.key,
                    current.g,
                    frontier.len()
                );
                continue;
            }
            self.visit(&current.key);
            if current.key == goal {
                found = true;
                self.snapshot(&frontier);
                break;
            }

            nbuf.clear();
            substrate.neighbors(&current.key, &mut nbuf);
            for (next, weight) in nbuf.drain(..) {
                let tentative = current.g.saturating_add(weight);
                if self.best.get(&next).is_some_and(|&known| tentative >= known) {
                    continue;
                }
                let h = estimate(&next);
                self.best.insert(next.clone(), tentative);
                self.parent.insert(next.clone(), current.key.clone());
                if let Some(h) = h {
                    self.estimates.insert(next.clone(), h);
                }
                self.recorder.record(Event::Relax {
                    key: next.clone(),
                    cost: tentative,
                    estimate: h,
                });
                frontier.push(next, tentative, h.unwrap_or(0.0));
            }
            self.snapshot(&frontier);
        }

        self.nbuf = nbuf;
        self.finish(&start, &goal, found)
    }

    /// Whether a popped entry still carries the authoritative cost.
    fn is_current(&self, entry: &Entry) -> bool {
        self.best.get(&entry.key) == Some(&entry.g)
    }

    fn visit(&mut self, key: &PosKey) {
        self.visited.push(key.clone());
        self.recorder.record(Event::Visit { key: key.clone() });
    }

    fn snapshot<F: Frontier>(&mut self, frontier: &F) {
        let items = frontier
            .ordered()
            .into_iter()
            .map(|e| FrontierItem {
                key: e.key.clone(),
                label: e.key.to_string(),
                rank: self.rank_of(e),
                stale: self.algorithm.is_weighted() && !self.is_current(e),
            })
            .collect();
        self.recorder.snapshot(items);
    }

    fn rank_of(&self, e: &Entry) -> Rank {
        match self.algorithm {
            Algorithm::Bfs | Algorithm::Dfs => Rank::Depth { depth: e.g },
            Algorithm::Dijkstra => Rank::Dist { dist: e.g },
            Algorithm::AStar => Rank::Estimate {
                f: e.f(),
                g: e.g,
                h: e.h,
            },
        }
    }

    fn finish(mut self, start: &PosKey, goal: &PosKey, found: bool) -> SearchResult {
        let path = if found {
            reconstruct(&self.parent, start, goal)
        } else {
            Vec::new()
        };
        let best_cost = if path.is_empty() {
            None
        } else {
            self.best.get(goal).copied()
        };
        match best_cost {
            Some(cost) => self.recorder.record(Event::GoalReached {
                length: path.len(),
                cost,
            }),
            None => self.recorder.record(Event::NoPathFound),
        }

        let meta = self
            .best
            .iter()
            .map(|(k, &cost)| {
                let m = NodeMeta {
                    cost,
                    heuristic: self.estimates.get(k).copied(),
                    parent: self.parent.get(k).cloned(),
                };
                (k.clone(), m)
            })
            .collect();

        log::debug!(
            "{} visited {} keys, path length {}",
            self.algorithm,
            self.visited.len(),
            path.len()
        );

        SearchResult {
            algorithm: self.algorithm,
            visited_order: self.visited,
            shortest_path: path,
            best_cost,
            trace: self.recorder.finish(),
            meta,
        }
    }
}

/// Walk parent pointers from `goal` back to `start`.
///
/// Returns the path start-to-goal inclusive, or an empty vector when the
/// chain never reaches `start`.
pub fn reconstruct(parent: &HashMap<PosKey, PosKey>, start: &PosKey, goal: &PosKey) -> Vec<PosKey> {
    let mut path = vec![goal.clone()];
    let mut cur = goal;
    while cur != start {
        match parent.get(cur) {
            Some(p) => {
                // A chain longer than the table means a cycle.
                if path.len() > parent.len() {
                    return Vec::new();
                }
                path.push(p.clone());
                cur = p;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
