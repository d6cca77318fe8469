//! Periodic host-resource sampling: CPU load from cumulative tick deltas,
//! active/wired memory, and mounted-volume capacity, published as a
//! latest-value snapshot for a presentation layer to read on its own timer.

pub mod config;
pub mod error;
pub mod format;
pub mod monitor;
pub mod state;
pub mod system;

pub use config::MonitorConfig;
pub use error::ProbeError;
pub use monitor::Monitor;
pub use state::{MonitorPhase, PublishedState};
pub use system::volumes::VolumeInfo;
