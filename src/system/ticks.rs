use tracing::warn;

use super::platform::{self, CoreTicks};

/// Cumulative CPU tick counts summed across all logical cores at one instant.
///
/// `Default` is the all-zero snapshot returned when the underlying host query
/// fails.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CpuTickSnapshot {
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub nice: f64,
}

impl CpuTickSnapshot {
    /// Sums per-core tick arrays into one cross-core snapshot. No per-core
    /// breakdown is retained; only the aggregate feeds the load estimator.
    pub fn aggregate(cores: &[CoreTicks]) -> Self {
        let mut snapshot = CpuTickSnapshot::default();
        for [user, system, idle, nice] in cores {
            snapshot.user += *user as f64;
            snapshot.system += *system as f64;
            snapshot.idle += *idle as f64;
            snapshot.nice += *nice as f64;
        }
        snapshot
    }
}

/// Takes point-in-time readings of the host's cumulative tick counters.
///
/// Fails closed: a failed host query logs the probe failure and yields a zero
/// snapshot instead of an error. The observed logical core count is kept as a
/// side effect of each successful sample.
#[derive(Debug, Default)]
pub struct TickSampler {
    core_count: usize,
}

impl TickSampler {
    pub fn new() -> Self {
        TickSampler::default()
    }

    pub fn sample(&mut self) -> CpuTickSnapshot {
        match platform::per_core_ticks() {
            Ok(cores) => {
                self.core_count = cores.len();
                CpuTickSnapshot::aggregate(&cores)
            }
            Err(err) => {
                warn!(error = %err, "cpu tick query failed, using zero snapshot");
                CpuTickSnapshot::default()
            }
        }
    }

    /// Logical core count observed by the most recent successful sample.
    pub fn core_count(&self) -> usize {
        self.core_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_sums_across_cores() {
        let cores = [[100, 50, 850, 0], [20, 10, 20, 5]];
        let snapshot = CpuTickSnapshot::aggregate(&cores);
        assert_eq!(snapshot.user, 120.0);
        assert_eq!(snapshot.system, 60.0);
        assert_eq!(snapshot.idle, 870.0);
        assert_eq!(snapshot.nice, 5.0);
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        assert_eq!(CpuTickSnapshot::aggregate(&[]), CpuTickSnapshot::default());
    }

    #[test]
    fn live_sample_observes_core_count() {
        let mut sampler = TickSampler::new();
        let snapshot = sampler.sample();
        assert!(sampler.core_count() >= 1);
        // Hosts that have been up for any time at all have accumulated ticks.
        assert!(snapshot.user + snapshot.system + snapshot.idle > 0.0);
    }
}
