use std::time::Duration;

use super::ticks::{CpuTickSnapshot, TickSampler};

/// Instantaneous CPU load from the delta between two tick snapshots.
///
/// Tick counters are cumulative since boot, so a single snapshot carries no
/// rate information; load only exists over a sampling window.
pub struct LoadEstimator {
    sampler: TickSampler,
    window: Duration,
}

impl LoadEstimator {
    pub fn new(window: Duration) -> Self {
        LoadEstimator {
            sampler: TickSampler::new(),
            window,
        }
    }

    /// Estimated load percentage over one window.
    ///
    /// Blocks the calling thread for the window duration; run it on a worker
    /// thread, never on a thread serving the presentation layer.
    pub fn estimate(&mut self) -> f64 {
        let first = self.sampler.sample();
        std::thread::sleep(self.window);
        let second = self.sampler.sample();
        load_between(&first, &second)
    }

    pub fn core_count(&self) -> usize {
        self.sampler.core_count()
    }
}

/// Load percentage between two snapshots: busy ticks over elapsed ticks.
///
/// A non-positive denominator (no elapsed ticks, or counters that went
/// backwards because one side is a zeroed failure snapshot) yields 0.0
/// rather than NaN or a negative rate.
pub fn load_between(first: &CpuTickSnapshot, second: &CpuTickSnapshot) -> f64 {
    let delta_user = second.user - first.user;
    let delta_system = second.system - first.system;
    let delta_idle = second.idle - first.idle;

    let busy = delta_user + delta_system;
    let elapsed = busy + delta_idle;
    if elapsed <= 0.0 || busy < 0.0 {
        return 0.0;
    }
    busy / elapsed * 100.0
}
