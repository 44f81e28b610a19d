//! Trace recording: the ordered event log of one search run, one frontier
//! snapshot per visit, and the pseudocode line each event belongs to.

use std::fmt;

use pathviz_core::PosKey;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;

// ---------------------------------------------------------------------------
// Pseudocode lines
// ---------------------------------------------------------------------------

/// The seven pseudocode lines shared by all four strategies, so a listing
/// can highlight "the current line" the same way for each of them.
///
/// [`NeighborLoop`](Self::NeighborLoop) and
/// [`NeighborGuard`](Self::NeighborGuard) are listing-only: the trace
/// records what happened to a neighbour, not the loop and check around it,
/// so [`Event::pseudo_line`] never returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PseudoLine {
    /// Initialise costs and seed the frontier with the start.
    #[default]
    Init,
    /// `while frontier is not empty` (also where "no path" ends up).
    LoopTop,
    /// Remove the next entry and visit it.
    Visit,
    /// `if u == goal` → done.
    GoalCheck,
    /// `for v in neighbors(u)`.
    NeighborLoop,
    /// Traversable / unseen / cheaper check on `v`.
    NeighborGuard,
    /// Enqueue, push or relax `v`.
    Update,
}

impl PseudoLine {
    /// Number of canonical lines.
    pub const COUNT: usize = 7;

    /// Zero-based line index.
    pub fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// One algorithmic event. Its `Display` form is the rendered log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Event {
    Start { algorithm: Algorithm, key: PosKey },
    Visit { key: PosKey },
    /// BFS discovery.
    Enqueue { key: PosKey },
    /// DFS discovery.
    Push { key: PosKey },
    /// Cheaper path found. `estimate` is the A* heuristic, absent for
    /// Dijkstra.
    Relax {
        key: PosKey,
        cost: i32,
        estimate: Option<f64>,
    },
    GoalReached { length: usize, cost: i32 },
    NoPathFound,
    /// Start or goal unset or unresolved; nothing was searched.
    MissingEndpoints,
}

impl Event {
    /// The pseudocode line this event highlights.
    pub fn pseudo_line(&self) -> PseudoLine {
        match self {
            Self::Start { .. } => PseudoLine::Init,
            Self::Visit { .. } => PseudoLine::Visit,
            Self::Enqueue { .. } | Self::Push { .. } | Self::Relax { .. } => PseudoLine::Update,
            Self::GoalReached { .. } => PseudoLine::GoalCheck,
            Self::NoPathFound | Self::MissingEndpoints => PseudoLine::LoopTop,
        }
    }

    /// The key this event concerns, if any.
    pub fn key(&self) -> Option<&PosKey> {
        match self {
            Self::Start { key, .. }
            | Self::Visit { key }
            | Self::Enqueue { key }
            | Self::Push { key }
            | Self::Relax { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn is_visit(&self) -> bool {
        matches!(self, Self::Visit { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start { algorithm, key } => write!(f, "{algorithm}: start at {key}"),
            Self::Visit { key } => write!(f, "Visit {key}"),
            Self::Enqueue { key } => write!(f, "Enqueue {key}"),
            Self::Push { key } => write!(f, "Push {key}"),
            Self::Relax {
                key,
                cost,
                estimate: None,
            } => write!(f, "Relax {key} newDist={cost}"),
            Self::Relax {
                key,
                cost,
                estimate: Some(h),
            } => write!(
                f,
                "Relax {key} g={cost} h={} f={}",
                fmt_num(*h),
                fmt_num(f64::from(*cost) + h)
            ),
            Self::GoalReached { length, cost } => {
                write!(f, "Reached the end; path length = {length}, cost = {cost}")
            }
            Self::NoPathFound => f.write_str("No path"),
            Self::MissingEndpoints => f.write_str("Please set Start and End nodes."),
        }
    }
}

/// Whole numbers without decimals, everything else with two.
pub(crate) fn fmt_num(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{x:.0}")
    } else {
        format!("{x:.2}")
    }
}

// ---------------------------------------------------------------------------
// Frontier snapshots
// ---------------------------------------------------------------------------

/// Ordering data shown next to a frontier item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rank {
    /// Hop depth at discovery (BFS, DFS).
    Depth { depth: i32 },
    /// Accumulated distance (Dijkstra).
    Dist { dist: i32 },
    /// A* scores.
    Estimate { f: f64, g: i32, h: f64 },
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Depth { depth } => write!(f, "depth={depth}"),
            Self::Dist { dist } => write!(f, "dist={dist}"),
            Self::Estimate { f: fv, g, h } => {
                write!(f, "f={} g={g} h={}", fmt_num(fv), fmt_num(h))
            }
        }
    }
}

/// One frontier entry as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierItem {
    pub key: PosKey,
    pub label: String,
    pub rank: Rank,
    /// A superseded priority-queue duplicate that will be skipped when
    /// popped.
    pub stale: bool,
}

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// The complete, immutable record of one search run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    events: Vec<Event>,
    /// Index into `events` of every `Visit`, in order.
    visits: Vec<usize>,
    /// Frontier contents right after each visit was processed.
    frontier: Vec<Vec<FrontierItem>>,
}

impl Trace {
    /// Every event in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The rendered log line of every event.
    pub fn log_lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// The pseudocode line of every event.
    pub fn pseudo_lines(&self) -> Vec<PseudoLine> {
        self.events.iter().map(Event::pseudo_line).collect()
    }

    /// Number of `Visit` events.
    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    /// Event index of the `n`-th visit.
    pub fn visit_event_index(&self, n: usize) -> Option<usize> {
        self.visits.get(n).copied()
    }

    /// All frontier snapshots, one per visit.
    pub fn frontier_snapshots(&self) -> &[Vec<FrontierItem>] {
        &self.frontier
    }

    /// Frontier snapshot taken after the `n`-th visit.
    pub fn frontier_at(&self, n: usize) -> Option<&[FrontierItem]> {
        self.frontier.get(n).map(Vec::as_slice)
    }

    /// The final event, which tells how the run ended.
    pub fn outcome(&self) -> Option<&Event> {
        self.events.last()
    }
}

/// Builds a [`Trace`] while an engine runs.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    trace: Trace,
}

impl Recorder {
    pub(crate) fn record(&mut self, event: Event) {
        log::trace!("{event}");
        if event.is_visit() {
            self.trace.visits.push(self.trace.events.len());
        }
        self.trace.events.push(event);
    }

    pub(crate) fn snapshot(&mut self, items: Vec<FrontierItem>) {
        debug_assert_eq!(self.trace.frontier.len() + 1, self.trace.visits.len());
        self.trace.frontier.push(items);
    }

    pub(crate) fn finish(self) -> Trace {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_render() {
        let events = [
            Event::Start {
                algorithm: Algorithm::Bfs,
                key: PosKey::cell(0, 0),
            },
            Event::Visit {
                key: PosKey::cell(0, 0),
            },
            Event::Enqueue {
                key: PosKey::cell(0, 1),
            },
            Event::Push {
                key: PosKey::node("B"),
            },
            Event::Relax {
                key: PosKey::node("B"),
                cost: 3,
                estimate: None,
            },
            Event::Relax {
                key: PosKey::cell(1, 1),
                cost: 2,
                estimate: Some(2.0),
            },
            Event::Relax {
                key: PosKey::node("C"),
                cost: 1,
                estimate: Some(2.236_067_977),
            },
            Event::GoalReached { length: 5, cost: 4 },
            Event::NoPathFound,
            Event::MissingEndpoints,
        ];
        let lines: Vec<String> = events.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "BFS: start at (0,0)",
                "Visit (0,0)",
                "Enqueue (0,1)",
                "Push B",
                "Relax B newDist=3",
                "Relax (1,1) g=2 h=2 f=4",
                "Relax C g=1 h=2.24 f=3.24",
                "Reached the end; path length = 5, cost = 4",
                "No path",
                "Please set Start and End nodes.",
            ]
        );
    }

    #[test]
    fn pseudo_line_classification() {
        assert_eq!(Event::NoPathFound.pseudo_line(), PseudoLine::LoopTop);
        assert_eq!(Event::MissingEndpoints.pseudo_line().index(), 1);
        assert_eq!(
            Event::Visit {
                key: PosKey::node("A")
            }
            .pseudo_line()
            .index(),
            2
        );
        assert_eq!(
            Event::GoalReached { length: 1, cost: 0 }.pseudo_line().index(),
            3
        );
        assert_eq!(
            Event::Push {
                key: PosKey::node("A")
            }
            .pseudo_line()
            .index(),
            6
        );
        assert_eq!(PseudoLine::Update.index(), PseudoLine::COUNT - 1);
    }

    #[test]
    fn neighbour_lines_are_listing_only() {
        let grid = pathviz_core::Grid::new(3, 3);
        for algo in Algorithm::ALL {
            let lines = algo.run(&crate::GridSubstrate::new(&grid)).trace.pseudo_lines();
            assert!(lines.contains(&PseudoLine::Update));
            assert!(!lines.contains(&PseudoLine::NeighborLoop), "{algo}");
            assert!(!lines.contains(&PseudoLine::NeighborGuard), "{algo}");
        }
    }

    #[test]
    fn recorder_tracks_visits() {
        let mut rec = Recorder::default();
        rec.record(Event::Start {
            algorithm: Algorithm::Dfs,
            key: PosKey::node("A"),
        });
        rec.record(Event::Visit {
            key: PosKey::node("A"),
        });
        rec.record(Event::Push {
            key: PosKey::node("B"),
        });
        rec.snapshot(vec![FrontierItem {
            key: PosKey::node("B"),
            label: "B".to_string(),
            rank: Rank::Depth { depth: 1 },
            stale: false,
        }]);
        rec.record(Event::Visit {
            key: PosKey::node("B"),
        });
        rec.snapshot(Vec::new());
        let trace = rec.finish();
        assert_eq!(trace.visit_count(), 2);
        assert_eq!(trace.visit_event_index(0), Some(1));
        assert_eq!(trace.visit_event_index(1), Some(3));
        assert_eq!(trace.frontier_at(0).map(<[_]>::len), Some(1));
        assert_eq!(trace.frontier_at(1), Some(&[][..]));
        assert_eq!(trace.events()[2].key(), Some(&PosKey::node("B")));
    }

    #[test]
    fn rank_display() {
        assert_eq!(Rank::Depth { depth: 2 }.to_string(), "depth=2");
        assert_eq!(Rank::Dist { dist: 7 }.to_string(), "dist=7");
        assert_eq!(
            Rank::Estimate {
                f: 4.5,
                g: 3,
                h: 1.5
            }
            .to_string(),
            "f=4.50 g=3 h=1.50"
        );
    }

    #[test]
    fn events_serialize_tagged() {
        let json = serde_json::to_string(&Event::Visit {
            key: PosKey::cell(1, 2),
        })
        .unwrap();
        assert!(json.contains("\"kind\":\"visit\""));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Event::Visit { key: PosKey::cell(1, 2) });
    }
}
