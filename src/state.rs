use serde::Serialize;

use crate::system::volumes::VolumeInfo;

/// Lifecycle of the monitor's driver task. There is no terminal phase; once
/// Running, the monitor samples until its owner drops it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum MonitorPhase {
    #[default]
    Uninitialized,
    Initializing,
    Running,
}

/// The latest host resource readings, published for the presentation layer.
///
/// Mutation is confined to the monitor's driver task; everyone else observes
/// through a `watch::Receiver` and never sees a half-written sample, because
/// CPU load and memory fields are overwritten together in one `send_modify`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PublishedState {
    pub phase: MonitorPhase,
    /// Logical core count, set during initialization.
    pub core_count: usize,
    /// Load over the most recent sampling window, 0..=100.
    pub cpu_load_percent: f64,
    pub memory_used_gb: f64,
    /// Physical memory; set on the first successful probe and constant after.
    pub memory_total_gb: f64,
    /// Whether the host CPU is an aarch64 (Apple-silicon-class) part.
    pub is_aarch64: bool,
    /// Mounted non-system volumes, enumerated once at startup.
    pub volumes: Vec<VolumeInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized_with_zeroed_readings() {
        let state = PublishedState::default();
        assert_eq!(state.phase, MonitorPhase::Uninitialized);
        assert_eq!(state.core_count, 0);
        assert_eq!(state.cpu_load_percent, 0.0);
        assert_eq!(state.memory_total_gb, 0.0);
        assert!(state.volumes.is_empty());
    }

    #[test]
    fn serializes_for_readout() {
        let state = PublishedState {
            phase: MonitorPhase::Running,
            core_count: 8,
            cpu_load_percent: 42.5,
            memory_used_gb: 9.25,
            memory_total_gb: 16.0,
            is_aarch64: false,
            volumes: Vec::new(),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"core_count\":8"));
    }
}
