use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Slowest playback speed.
pub const MIN_SPEED: u32 = 1;
/// Fastest playback speed.
pub const MAX_SPEED: u32 = 100;
/// Speed of a fresh session.
pub const DEFAULT_SPEED: u32 = 50;

/// Playback settings.
///
/// Changing them never invalidates a built run; the next tick simply picks
/// up the new delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    /// 1 (slow) to 100 (fast).
    pub speed: u32,
    /// Jump straight to the final step instead of animating.
    pub fast_solve: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            fast_solve: false,
        }
    }
}

impl PlayerConfig {
    /// Set the speed, clamped into `MIN_SPEED..=MAX_SPEED`.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Pause between two play ticks: `max(5, 205 - 2 * speed)` ms.
    pub fn delay(&self) -> Duration {
        let speed = i64::from(self.speed.clamp(MIN_SPEED, MAX_SPEED));
        let ms = (205 - 2 * speed).max(5);
        Duration::from_millis(ms.unsigned_abs())
    }
}
