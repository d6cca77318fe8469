use thiserror::Error;

/// A recoverable failure in one of the host probes.
///
/// Probes never surface these to their callers: every failure is logged and
/// collapsed into a documented zero default so sampling continues on the next
/// tick. The variants exist for the log side-channel and for the platform
/// layer, which does return `Result`.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A native host query returned a non-success status.
    #[error("host query `{call}` failed with status {status}")]
    HostCall { call: &'static str, status: i32 },

    /// Counter data was present but could not be parsed.
    #[error("malformed counter data: {0}")]
    Malformed(String),

    /// A mounted volume reported no readable capacity.
    #[error("volume `{path}` has no readable capacity")]
    UnreadableVolume { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
