// src/config.rs

use std::time::Duration;

// Default runtime configuration
pub const DEFAULT_MAX_VIRTUAL_CHANNELS: u32 = 512;
pub const DEFAULT_UPDATE_HZ: u32 = 60;

// Bounds on the tick period. Zero would spin on the engine lock.
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(1);
pub const MAX_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for a [`Runtime`](crate::Runtime).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuntimeConfig {
    /// Virtual channel capacity requested when the session is created.
    pub max_virtual_channels: u32,

    /// Period between engine ticks.
    pub update_interval: Duration,

    /// Start the update scheduler on `initialize`.
    ///
    /// Hosts that drive `update()` from their own frame loop turn this off.
    pub autostart_scheduler: bool,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            max_virtual_channels: DEFAULT_MAX_VIRTUAL_CHANNELS,
            update_interval: Duration::from_secs(1) / DEFAULT_UPDATE_HZ,
            autostart_scheduler: true,
        }
    }

    /// Set the tick period, clamped to `MIN_UPDATE_INTERVAL..=MAX_UPDATE_INTERVAL`.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = clamp_interval(interval);
        self
    }

    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart_scheduler = autostart;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(MIN_UPDATE_INTERVAL, MAX_UPDATE_INTERVAL)
}
