//! Step player for the pathfinding visualizer.
//!
//! [`Steps`] turns a finished search into a sequence of renderable
//! positions; [`PlayerSession`] owns the editable grid and graph, the
//! chosen algorithm and the playback cursor, and drives a cancellable
//! tick-based play loop.

mod config;
mod session;
mod steps;

pub use config::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED, PlayerConfig};
pub use session::{
    DEFAULT_GRID_SIDE, MAX_GRID_SIDE, MIN_GRID_SIDE, Mode, PlayTick, PlayerSession, RunSummary,
};
pub use steps::{Step, StepView, Steps};
