use std::path::PathBuf;
use std::time::Duration;

use crate::client::TagId;

/// Default sampling cadence: one cycle per minute.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Static agent configuration.
///
/// Built once at startup and passed by reference into the orchestrator.
/// Nothing here changes at runtime; in particular the tag list is fixed, so
/// every logged row has the same width for the life of the process.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Server endpoint URI.
    pub endpoint: String,
    /// Delay between sampling cycles.
    pub interval: Duration,
    /// Tags to sample each cycle, in column order. Duplicates are valid and
    /// produce independent columns.
    pub tags: Vec<TagId>,
    /// Directory the hourly CSV files go to.
    pub log_dir: PathBuf,
}

/// The stock tag list: seven simulation-server points plus three repeats.
/// The repeats are deliberate; each occurrence gets its own column.
pub fn default_tags() -> Vec<TagId> {
    [
        "ns=3;i=1001", // Counter
        "ns=3;i=1002", // Random
        "ns=3;i=1003", // Sawtooth
        "ns=3;i=1004", // Sinusoid
        "ns=3;i=1005", // Square
        "ns=3;i=1006", // Triangle
        "ns=3;i=1007", // Constant
        "ns=3;i=1001", // Counter again
        "ns=3;i=1002", // Random again
        "ns=3;i=1003", // Sawtooth again
    ]
    .into_iter()
    .map(TagId::from)
    .collect()
}
