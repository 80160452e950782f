//! Logging setup and pipeline phase labels.
//!
//! Install the subscriber once at startup:
//!
//! ```ignore
//! use repodoc::observability::init_tracing;
//!
//! init_tracing("info");
//! ```
//!
//! `RUST_LOG` takes precedence over the configured default level.

use std::fmt;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Stage of the analysis pipeline, recorded on log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Fetching,
    Cloning,
    Analyzing,
    Summarizing,
    Assembling,
}

impl AnalysisPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPhase::Fetching => "fetching",
            AnalysisPhase::Cloning => "cloning",
            AnalysisPhase::Analyzing => "analyzing",
            AnalysisPhase::Summarizing => "summarizing",
            AnalysisPhase::Assembling => "assembling",
        }
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
