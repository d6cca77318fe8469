use crate::error::ProbeError;

/// Per-core scheduler states we account: user, system, idle, nice.
pub const CPU_STATE_COUNT: usize = 4;

/// Cumulative tick counters for one logical core, in
/// `[user, system, idle, nice]` order.
pub type CoreTicks = [u64; CPU_STATE_COUNT];

/// Active and wired memory, already converted to bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryCounts {
    pub active_bytes: u64,
    pub wired_bytes: u64,
}

pub trait HostQueries {
    /// One point-in-time reading of cumulative tick counters, one entry per
    /// logical core. Counters are monotonically increasing since boot.
    fn per_core_ticks() -> Result<Vec<CoreTicks>, ProbeError>;

    fn memory_counts() -> Result<MemoryCounts, ProbeError>;

    fn total_memory_bytes() -> Result<u64, ProbeError>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;

pub fn per_core_ticks() -> Result<Vec<CoreTicks>, ProbeError> {
    platform_impl::Platform::per_core_ticks()
}

pub fn memory_counts() -> Result<MemoryCounts, ProbeError> {
    platform_impl::Platform::memory_counts()
}

pub fn total_memory_bytes() -> Result<u64, ProbeError> {
    platform_impl::Platform::total_memory_bytes()
}
