use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TARGET_FPS: u32 = 120;
pub const DEFAULT_INPUT_POLL_MS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub target_fps: u32,
    pub input_poll_ms: u64,
    pub quit_keys: Vec<char>,
    pub alternate_screen: bool,
    pub farewell: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            input_poll_ms: DEFAULT_INPUT_POLL_MS,
            quit_keys: vec!['q'],
            alternate_screen: true,
            farewell: "Done!".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn frame_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.target_fps.max(1)))
    }

    pub fn input_poll_interval(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms.max(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/config.rs"]
mod tests;
