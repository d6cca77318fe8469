use std::time::Duration;

/// How often the monitor arms a sampling tick.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(700);

/// How long the load estimator waits between its two tick snapshots.
pub const DEFAULT_LOAD_WINDOW: Duration = Duration::from_secs(1);

/// Timing knobs for the monitor. Fixed for the process lifetime; there is no
/// config file or runtime reconfiguration, only construction-time override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub sample_interval: Duration,
    pub load_window: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            load_window: DEFAULT_LOAD_WINDOW,
        }
    }
}
