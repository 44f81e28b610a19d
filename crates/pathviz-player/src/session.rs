//! The player session: the editable substrate, the chosen algorithm, the
//! built steps and the playback cursor, owned by the caller.
//!
//! Every edit that changes what a search would see goes through
//! [`PlayerSession::invalidate`], which drops the built steps and bumps the
//! run id. The play loop is driven from outside: [`PlayerSession::play`]
//! hands out a [`PlayTick`], the caller waits `tick.delay` and passes it
//! back to [`PlayerSession::tick`]. A tick whose run id is no longer current
//! does nothing, so an edit or a pause cancels any tick already in flight.

use std::collections::BTreeMap;
use std::time::Duration;

use pathviz_core::{Graph, GraphError, Grid, Point, PosKey};
use pathviz_paths::{
    Algorithm, GraphSubstrate, GridSubstrate, HeuristicSubstrate, NodeMeta, SearchResult,
};
use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::steps::{StepView, Steps};

/// Smallest grid side accepted by [`PlayerSession::set_size`].
pub const MIN_GRID_SIDE: i32 = 3;
/// Largest grid side accepted by [`PlayerSession::set_size`].
pub const MAX_GRID_SIDE: i32 = 60;
/// Grid side of a fresh session.
pub const DEFAULT_GRID_SIDE: i32 = 8;

/// Which substrate the session searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Grid,
    Graph,
}

/// Pending play-loop tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTick {
    /// Run id the tick was issued for.
    pub run_id: u64,
    /// How long to wait before applying it.
    pub delay: Duration,
}

/// Figures shown once a run has been built.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// The engine's cost for the goal.
    pub best_cost: Option<i32>,
    /// Sum of the substrate's move costs along the path, whatever the
    /// algorithm.
    pub path_cost: Option<i32>,
    /// Number of keys on the path.
    pub path_length: usize,
    pub meta: BTreeMap<PosKey, NodeMeta>,
}

/// One visualizer instance.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    mode: Mode,
    grid: Grid,
    graph: Graph,
    algorithm: Algorithm,
    config: PlayerConfig,
    steps: Option<Steps>,
    summary: Option<RunSummary>,
    /// -1 is the pre-start position.
    index: isize,
    run_id: u64,
    playing: bool,
}

impl Default for PlayerSession {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl PlayerSession {
    /// A grid-mode BFS session on a fresh 8×8 grid and an empty graph.
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            mode: Mode::Grid,
            grid: Grid::new(DEFAULT_GRID_SIDE, DEFAULT_GRID_SIDE),
            graph: Graph::new(),
            algorithm: Algorithm::default(),
            config,
            steps: None,
            summary: None,
            index: -1,
            run_id: 0,
            playing: false,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Current step index; -1 before the first step.
    pub fn index(&self) -> isize {
        self.index
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Built steps, if any.
    pub fn steps(&self) -> Option<&Steps> {
        self.steps.as_ref()
    }

    /// The last built run, if any.
    pub fn result(&self) -> Option<&SearchResult> {
        self.steps.as_ref().map(Steps::result)
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Number of built steps, 0 when nothing is built.
    pub fn step_count(&self) -> usize {
        self.steps.as_ref().map_or(0, Steps::len)
    }

    /// `(min(total, index + 1), total)`.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.step_count();
        let done = usize::try_from(self.index + 1).unwrap_or(0).min(total);
        (done, total)
    }

    /// What to render at the current index.
    pub fn view(&self) -> Option<StepView<'_>> {
        self.steps.as_ref().map(|s| s.view(self.index))
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub fn set_speed(&mut self, speed: u32) {
        self.config.set_speed(speed);
    }

    pub fn set_fast_solve(&mut self, on: bool) {
        self.config.fast_solve = on;
    }

    /// Switch substrate. Returns `false` if `mode` was already active.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        self.edited(|s| {
            let changed = s.mode != mode;
            s.mode = mode;
            changed
        })
    }

    /// Switch algorithm. Returns `false` if `algorithm` was already active.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> bool {
        self.edited(|s| {
            let changed = s.algorithm != algorithm;
            s.algorithm = algorithm;
            changed
        })
    }

    /// Replace the grid with a fresh one, each side clamped into
    /// `MIN_GRID_SIDE..=MAX_GRID_SIDE`.
    pub fn set_size(&mut self, rows: i32, cols: i32) {
        let rows = rows.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE);
        let cols = cols.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE);
        self.grid = Grid::new(rows, cols);
        self.invalidate();
    }

    /// Fresh grid of the current size in grid mode, empty graph in graph
    /// mode.
    pub fn reset(&mut self) {
        match self.mode {
            Mode::Grid => self.grid = Grid::new(self.grid.rows(), self.grid.cols()),
            Mode::Graph => self.graph.clear(),
        }
        self.invalidate();
    }

    // -----------------------------------------------------------------------
    // Grid edits
    // -----------------------------------------------------------------------

    pub fn toggle_wall(&mut self, p: Point) -> bool {
        self.edited(|s| s.grid.toggle_wall(p))
    }

    pub fn cycle_weight(&mut self, p: Point) -> bool {
        self.edited(|s| s.grid.cycle_weight(p))
    }

    pub fn set_cell_weight(&mut self, p: Point, weight: i32) -> bool {
        self.edited(|s| s.grid.set_weight(p, weight))
    }

    pub fn set_grid_start(&mut self, p: Point) -> bool {
        self.edited(|s| s.grid.set_start(p))
    }

    pub fn set_grid_end(&mut self, p: Point) -> bool {
        self.edited(|s| s.grid.set_end(p))
    }

    // -----------------------------------------------------------------------
    // Graph edits
    // -----------------------------------------------------------------------

    pub fn add_node(&mut self, x: f64, y: f64) -> String {
        let id = self.graph.add_node(x, y);
        self.invalidate();
        id
    }

    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.edited(|s| s.graph.move_node(id, x, y))
    }

    pub fn connect(&mut self, from: &str, to: &str, weight: i32) -> Option<String> {
        let id = self.graph.connect(from, to, weight);
        if id.is_some() {
            self.invalidate();
        }
        id
    }

    pub fn set_edge_weight(&mut self, edge_id: &str, weight: i32) -> bool {
        self.edited(|s| s.graph.set_edge_weight(edge_id, weight))
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        self.edited(|s| s.graph.remove_node(id))
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> bool {
        self.edited(|s| s.graph.remove_edge(edge_id))
    }

    pub fn set_graph_start(&mut self, id: &str) -> bool {
        self.edited(|s| s.graph.set_start(id))
    }

    pub fn set_graph_end(&mut self, id: &str) -> bool {
        self.edited(|s| s.graph.set_end(id))
    }

    /// Toggle snapping of node positions; only affects later placements.
    pub fn set_snap(&mut self, on: bool) {
        self.graph.snap = on;
    }

    /// Replace the graph with one parsed from JSON. A rejected document
    /// leaves the session untouched.
    pub fn import_graph(&mut self, text: &str) -> Result<(), GraphError> {
        match Graph::from_json(text) {
            Ok(graph) => {
                self.graph = graph;
                self.invalidate();
                Ok(())
            }
            Err(err) => {
                log::warn!("graph import rejected: {err}");
                Err(err)
            }
        }
    }

    pub fn export_graph(&self) -> Result<String, GraphError> {
        self.graph.to_json()
    }

    // -----------------------------------------------------------------------
    // Run lifecycle
    // -----------------------------------------------------------------------

    /// Run an edit and invalidate if it reported a change.
    fn edited(&mut self, edit: impl FnOnce(&mut Self) -> bool) -> bool {
        let changed = edit(self);
        if changed {
            self.invalidate();
        }
        changed
    }

    /// Drop the built run, stop playback and cancel pending ticks.
    pub fn invalidate(&mut self) {
        self.run_id = self.run_id.wrapping_add(1);
        self.steps = None;
        self.summary = None;
        self.index = -1;
        self.playing = false;
        log::debug!("invalidated, run id {}", self.run_id);
    }

    /// Search the current substrate and rebuild the step sequence. The
    /// cursor returns to pre-start.
    pub fn rebuild(&mut self) {
        self.run_id = self.run_id.wrapping_add(1);
        self.playing = false;
        self.index = -1;

        let (result, path_cost) = match self.mode {
            Mode::Grid => run_on(self.algorithm, &GridSubstrate::new(&self.grid)),
            Mode::Graph => run_on(self.algorithm, &GraphSubstrate::new(&self.graph)),
        };
        self.summary = Some(RunSummary {
            best_cost: result.best_cost,
            path_cost,
            path_length: result.shortest_path.len(),
            meta: result.meta.clone(),
        });
        let steps = Steps::build(result);
        log::debug!(
            "rebuilt {} steps for {} (path length {})",
            steps.len(),
            self.algorithm,
            steps.result().shortest_path.len()
        );
        self.steps = Some(steps);
    }

    fn ensure_built(&mut self) -> isize {
        if self.steps.is_none() {
            self.rebuild();
        }
        self.steps.as_ref().map_or(-1, Steps::last_index)
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    /// Advance one step, building first if needed. Returns whether the
    /// index moved.
    pub fn step_forward(&mut self) -> bool {
        let last = self.ensure_built();
        self.move_to((self.index + 1).min(last))
    }

    /// Go back one step, stopping at pre-start.
    pub fn step_backward(&mut self) -> bool {
        self.move_to((self.index - 1).max(-1))
    }

    /// Jump to `index`, clamped into `-1..=last`.
    pub fn seek_to(&mut self, index: isize) -> bool {
        let last = self.ensure_built();
        self.move_to(index.clamp(-1, last.max(-1)))
    }

    pub fn to_start(&mut self) -> bool {
        self.move_to(-1)
    }

    pub fn to_end(&mut self) -> bool {
        let last = self.ensure_built();
        self.move_to(last)
    }

    fn move_to(&mut self, index: isize) -> bool {
        let moved = self.index != index;
        self.index = index;
        moved
    }

    // -----------------------------------------------------------------------
    // Play loop
    // -----------------------------------------------------------------------

    /// Start playing. Builds first if needed and restarts from pre-start
    /// when already at the end.
    ///
    /// With fast solve on, jumps to the end and returns `None`. Otherwise
    /// returns the first tick to schedule.
    pub fn play(&mut self) -> Option<PlayTick> {
        let last = self.ensure_built();
        if self.config.fast_solve {
            self.playing = false;
            self.to_end();
            log::debug!("fast solve to step {last}");
            return None;
        }
        if self.index >= last {
            self.index = -1;
        }
        // A new loop supersedes any tick still in flight.
        self.run_id = self.run_id.wrapping_add(1);
        self.playing = true;
        Some(self.next_tick())
    }

    /// Apply a tick issued by [`play`](Self::play) or a previous `tick`.
    ///
    /// Returns the next tick to schedule, or `None` once the end is reached
    /// or when the tick is stale.
    pub fn tick(&mut self, tick: PlayTick) -> Option<PlayTick> {
        if tick.run_id != self.run_id || !self.playing {
            log::trace!("dropping stale tick for run {}", tick.run_id);
            return None;
        }
        let last = self.steps.as_ref().map_or(-1, Steps::last_index);
        if self.index < last {
            self.index += 1;
        }
        if self.index >= last {
            self.playing = false;
            return None;
        }
        Some(self.next_tick())
    }

    /// Stop playing, keeping the index.
    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.run_id = self.run_id.wrapping_add(1);
        }
    }

    /// Play to the end on the current thread, calling `sleep` between
    /// ticks.
    pub fn play_blocking(&mut self, mut sleep: impl FnMut(Duration)) {
        let mut next = self.play();
        while let Some(tick) = next {
            sleep(tick.delay);
            next = self.tick(tick);
        }
    }

    /// Rebuild, then either jump to the end (fast solve) or start playing.
    pub fn run_algorithm(&mut self) -> Option<PlayTick> {
        self.rebuild();
        self.play()
    }

    fn next_tick(&self) -> PlayTick {
        PlayTick {
            run_id: self.run_id,
            delay: self.config.delay(),
        }
    }
}

fn run_on<S: HeuristicSubstrate>(
    algorithm: Algorithm,
    substrate: &S,
) -> (SearchResult, Option<i32>) {
    let result = algorithm.run(substrate);
    let path_cost = if result.found() {
        substrate.path_cost(&result.shortest_path)
    } else {
        None
    };
    (result, path_cost)
}
