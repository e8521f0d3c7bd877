//! Timeline playback configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Auto-play period in milliseconds.
    pub ms_play_interval: u64,
    /// Recenter the view on the visible features after every step.
    pub pan_zoom: bool,
}

impl TimelineConfig {
    pub fn play_interval(&self) -> Duration {
        Duration::from_millis(self.ms_play_interval)
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            ms_play_interval: 1500,
            pan_zoom: true,
        }
    }
}
