//! Renderable steps derived from one search run.
//!
//! A run is replayed in two phases: one step per visit (the frontier is
//! shown, no path yet), then one step per node of the path as it is
//! revealed from start to goal.

use pathviz_core::PosKey;
use pathviz_paths::{Event, FrontierItem, PseudoLine, SearchResult};

/// One discrete playback position. Every field counts into the run's
/// sequences, so a step never copies keys or events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Length of the visited prefix shown.
    pub visited: usize,
    /// Length of the path prefix shown.
    pub path: usize,
    /// Index of the frontier snapshot shown, if any.
    pub frontier: Option<usize>,
    /// Number of log lines shown.
    pub log_count: usize,
    /// Pseudocode line to highlight.
    pub line: PseudoLine,
}

/// What a renderer needs at one playback position.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView<'a> {
    pub visited_so_far: &'a [PosKey],
    pub path_so_far: &'a [PosKey],
    pub frontier: Option<&'a [FrontierItem]>,
    /// Events whose log lines are shown.
    pub logs: &'a [Event],
    /// Highlighted pseudocode line; `None` before the first step.
    pub line: Option<PseudoLine>,
}

impl StepView<'_> {
    /// Index of the most recent log line, if any is shown.
    pub fn current_log(&self) -> Option<usize> {
        self.logs.len().checked_sub(1)
    }

    /// Rendered log lines shown so far.
    pub fn log_lines(&self) -> Vec<String> {
        self.logs.iter().map(ToString::to_string).collect()
    }
}

const EMPTY_VIEW: StepView<'static> = StepView {
    visited_so_far: &[],
    path_so_far: &[],
    frontier: None,
    logs: &[],
    line: None,
};

/// A search run together with its step sequence.
#[derive(Debug, Clone)]
pub struct Steps {
    result: SearchResult,
    steps: Vec<Step>,
}

impl Steps {
    /// Derive the step sequence from a finished run.
    pub fn build(result: SearchResult) -> Self {
        let trace = &result.trace;
        let total_logs = trace.events().len();
        let line_at = |count: usize| {
            count
                .checked_sub(1)
                .and_then(|i| trace.events().get(i))
                .map(Event::pseudo_line)
                .unwrap_or_default()
        };

        let visits = trace.visit_count();
        let found = result.found();
        let mut steps = Vec::with_capacity(visits + result.shortest_path.len());

        if visits == 0 {
            // Nothing was searched; show the explanation.
            steps.push(Step {
                visited: 0,
                path: 0,
                frontier: None,
                log_count: total_logs,
                line: line_at(total_logs),
            });
        }

        for n in 0..visits {
            let log_count = match trace.visit_event_index(n + 1) {
                Some(next) => next,
                // The goal's GoalReached line belongs to the reveal phase.
                None if found => total_logs - 1,
                None => total_logs,
            };
            steps.push(Step {
                visited: n + 1,
                path: 0,
                frontier: Some(n),
                log_count,
                line: line_at(log_count),
            });
        }

        for k in 1..=result.shortest_path.len() {
            steps.push(Step {
                visited: visits,
                path: k,
                frontier: None,
                log_count: total_logs,
                line: line_at(total_logs),
            });
        }

        Self { result, steps }
    }

    /// The run the steps were built from.
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The last valid index, `-1` when there are no steps.
    pub fn last_index(&self) -> isize {
        self.steps.len() as isize - 1
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The view at `index`; anything below zero is the pre-start view.
    pub fn view(&self, index: isize) -> StepView<'_> {
        let Some(step) = usize::try_from(index).ok().and_then(|i| self.steps.get(i)) else {
            return EMPTY_VIEW;
        };
        let trace = &self.result.trace;
        StepView {
            visited_so_far: &self.result.visited_order[..step.visited],
            path_so_far: &self.result.shortest_path[..step.path],
            frontier: step.frontier.and_then(|n| trace.frontier_at(n)),
            logs: &trace.events()[..step.log_count],
            line: Some(step.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{Graph, Grid, Point};
    use pathviz_paths::{Algorithm, GraphSubstrate, GridSubstrate};

    fn grid_steps(grid: &Grid, algo: Algorithm) -> Steps {
        Steps::build(algo.run(&GridSubstrate::new(grid)))
    }

    #[test]
    fn explore_then_reveal() {
        let grid = Grid::new(3, 3);
        let steps = grid_steps(&grid, Algorithm::Bfs);
        assert_eq!(steps.len(), 9 + 5);

        let first = steps.view(0);
        assert_eq!(first.visited_so_far, &[PosKey::cell(0, 0)]);
        assert!(first.path_so_far.is_empty());
        assert_eq!(first.frontier.map(<[_]>::len), Some(2));
        // Start, visit, two enqueues.
        assert_eq!(
            first.log_lines(),
            ["BFS: start at (0,0)", "Visit (0,0)", "Enqueue (0,1)", "Enqueue (1,0)"]
        );
        assert_eq!(first.line, Some(PseudoLine::Update));
        assert_eq!(first.current_log(), Some(3));

        let last_visit = steps.view(8);
        assert_eq!(last_visit.visited_so_far.len(), 9);
        assert_eq!(last_visit.line, Some(PseudoLine::Visit));
        assert!(last_visit.logs.last().is_some_and(Event::is_visit));

        let reveal = steps.view(9);
        assert_eq!(reveal.path_so_far, &[PosKey::cell(0, 0)]);
        assert_eq!(reveal.frontier, None);
        assert_eq!(reveal.line, Some(PseudoLine::GoalCheck));

        let end = steps.view(steps.last_index());
        assert_eq!(end.path_so_far.len(), 5);
        assert_eq!(end.logs.len(), steps.result().trace.events().len());
    }

    #[test]
    fn pre_start_is_empty() {
        let grid = Grid::new(3, 3);
        let steps = grid_steps(&grid, Algorithm::Dijkstra);
        let v = steps.view(-1);
        assert!(v.visited_so_far.is_empty());
        assert!(v.logs.is_empty());
        assert_eq!(v.line, None);
        assert_eq!(v.current_log(), None);
        assert_eq!(steps.view(steps.last_index() + 1), EMPTY_VIEW);
    }

    #[test]
    fn unreachable_goal_has_no_reveal_phase() {
        let mut grid = Grid::new(3, 3);
        grid.toggle_wall(Point::cell(1, 2));
        grid.toggle_wall(Point::cell(2, 1));
        let steps = grid_steps(&grid, Algorithm::AStar);
        let visits = steps.result().visited_order.len();
        assert_eq!(steps.len(), visits);
        let end = steps.view(steps.last_index());
        assert_eq!(end.log_lines().last().map(String::as_str), Some("No path"));
        assert_eq!(end.line, Some(PseudoLine::LoopTop));
    }

    #[test]
    fn missing_endpoints_yield_one_step() {
        let graph = Graph::new();
        let steps = Steps::build(Algorithm::Bfs.run(&GraphSubstrate::new(&graph)));
        assert_eq!(steps.len(), 1);
        let v = steps.view(0);
        assert_eq!(v.log_lines(), ["Please set Start and End nodes."]);
        assert!(v.visited_so_far.is_empty());
        assert_eq!(v.frontier, None);
    }

    #[test]
    fn log_counts_never_shrink() {
        let mut grid = Grid::new(4, 4);
        grid.set_weight(Point::cell(1, 1), 5);
        let steps = grid_steps(&grid, Algorithm::Dijkstra);
        let counts: Vec<usize> = (0..steps.len()).map(|i| steps.get(i).unwrap().log_count).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(counts.last(), Some(&steps.result().trace.events().len()));
    }
}
