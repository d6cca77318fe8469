use tracing::warn;

use super::platform;

/// Active and wired memory at one instant, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub active_bytes: u64,
    pub wired_bytes: u64,
}

impl MemorySnapshot {
    /// Memory counted as in use: active plus wired.
    pub fn used_bytes(&self) -> u64 {
        self.active_bytes + self.wired_bytes
    }
}

/// Reads host memory counters. Fails closed like the tick sampler: a failed
/// query logs and returns the zero snapshot, and callers leave previously
/// published values untouched when they see it.
#[derive(Debug, Default)]
pub struct MemoryProbe;

impl MemoryProbe {
    pub fn new() -> Self {
        MemoryProbe
    }

    pub fn sample(&self) -> MemorySnapshot {
        match platform::memory_counts() {
            Ok(counts) => MemorySnapshot {
                active_bytes: counts.active_bytes,
                wired_bytes: counts.wired_bytes,
            },
            Err(err) => {
                warn!(error = %err, "memory query failed, using zero snapshot");
                MemorySnapshot::default()
            }
        }
    }

    /// Total physical memory. Effectively constant for the process lifetime;
    /// fetched independently of the per-tick counters.
    pub fn total_bytes(&self) -> Option<u64> {
        match platform::total_memory_bytes() {
            Ok(total) => Some(total),
            Err(err) => {
                warn!(error = %err, "total memory query failed");
                None
            }
        }
    }
}
