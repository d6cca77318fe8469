use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::config::MonitorConfig;
use crate::format::bytes_to_gb;
use crate::state::{MonitorPhase, PublishedState};
use crate::system::load::LoadEstimator;
use crate::system::memory::{MemoryProbe, MemorySnapshot};
use crate::system::ticks::TickSampler;
use crate::system::volumes::{VolumeInfo, VolumeProbe};

/// Result of one background sampling pass, marshalled back to the driver
/// task, which is the only writer of [`PublishedState`].
struct SampleOutcome {
    core_count: usize,
    cpu_load_percent: f64,
    memory: MemorySnapshot,
    memory_total_bytes: Option<u64>,
}

/// Periodic background sampler publishing the latest host readings.
///
/// `spawn` must be called from within a Tokio runtime. Dropping the monitor
/// aborts the driver task; sampling work already running on the blocking pool
/// finishes on its own and its outcome is discarded when the send to the
/// closed driver channel fails.
pub struct Monitor {
    state_rx: watch::Receiver<PublishedState>,
    driver: JoinHandle<()>,
}

impl Monitor {
    pub fn spawn(config: MonitorConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(PublishedState::default());
        let driver = tokio::spawn(drive(config, state_tx));
        Monitor { state_rx, driver }
    }

    /// A read-only handle observing the latest published state.
    pub fn state(&self) -> watch::Receiver<PublishedState> {
        self.state_rx.clone()
    }

    /// The most recently published state.
    pub fn latest(&self) -> PublishedState {
        self.state_rx.borrow().clone()
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

async fn drive(config: MonitorConfig, state: watch::Sender<PublishedState>) {
    state.send_modify(|s| s.phase = MonitorPhase::Initializing);

    // One-time startup work: architecture class, volume enumeration, and an
    // initial tick sample to seed the core count before the first window
    // completes. Enumeration touches the filesystem, so it runs on the
    // blocking pool like the sampling passes.
    let init = tokio::task::spawn_blocking(initialize).await;
    let (volumes, core_count) = match init {
        Ok(result) => result,
        Err(err) => {
            error!(error = %err, "startup probe task failed");
            (Vec::new(), 0)
        }
    };
    state.send_modify(|s| {
        s.phase = MonitorPhase::Running;
        s.is_aarch64 = cfg!(target_arch = "aarch64");
        s.core_count = core_count;
        s.volumes = volumes;
    });

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let mut ticker = tokio::time::interval(config.sample_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Each tick's sampling pass is independent: a slow or hung
                // host call stalls only its own blocking task, never the
                // ticker. Overlapping passes race and the last write wins.
                let outcome_tx = outcome_tx.clone();
                let window = config.load_window;
                let need_total = state.borrow().memory_total_gb == 0.0;
                tokio::task::spawn_blocking(move || {
                    let outcome = collect_sample(window, need_total);
                    if outcome_tx.send(outcome).is_err() {
                        debug!("driver gone, discarding sample outcome");
                    }
                });
            }
            Some(outcome) = outcome_rx.recv() => {
                publish(&state, outcome);
            }
        }
    }
}

fn initialize() -> (Vec<VolumeInfo>, usize) {
    let volumes = VolumeProbe::new().enumerate();
    let mut sampler = TickSampler::new();
    sampler.sample();
    (volumes, sampler.core_count())
}

/// One sampling pass. Blocks for the load window; runs on the blocking pool.
fn collect_sample(window: Duration, need_total: bool) -> SampleOutcome {
    let memory_probe = MemoryProbe::new();
    let memory = memory_probe.sample();
    let memory_total_bytes = if need_total {
        memory_probe.total_bytes()
    } else {
        None
    };

    let mut estimator = LoadEstimator::new(window);
    let cpu_load_percent = estimator.estimate();

    SampleOutcome {
        core_count: estimator.core_count(),
        cpu_load_percent,
        memory,
        memory_total_bytes,
    }
}

/// Applies one outcome to the published state. CPU load and memory fields
/// change together in a single `send_modify`, so observers never see a pair
/// drawn from different passes. A zero memory snapshot marks a failed probe
/// and leaves the previously published memory fields alone.
fn publish(state: &watch::Sender<PublishedState>, outcome: SampleOutcome) {
    state.send_modify(|s| {
        s.cpu_load_percent = outcome.cpu_load_percent;
        if outcome.core_count > 0 {
            s.core_count = outcome.core_count;
        }
        if outcome.memory.used_bytes() > 0 {
            s.memory_used_gb = bytes_to_gb(outcome.memory.used_bytes());
        }
        if s.memory_total_gb == 0.0
            && let Some(total) = outcome.memory_total_bytes
        {
            s.memory_total_gb = bytes_to_gb(total);
        }
    });
}
