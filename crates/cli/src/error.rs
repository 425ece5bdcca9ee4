//! Failures of the `microbe-forge` binary and the exit status each one maps to.
//!
//! | status | cause                                              |
//! |--------|----------------------------------------------------|
//! | 2      | argument parsing (reported by clap)                |
//! | 10     | rendering: unknown asset, bad config, failed batch |
//! | 11     | writing a PNG or creating an output directory      |
//! | 12     | `--config` is not valid JSON                       |
//! | 13     | a JSON report could not be produced                |

use std::path::PathBuf;

use microbe_forge_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Render(EngineError),

    #[error("cannot write image: {0}")]
    Write(String),

    #[error("cannot create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid --config JSON: {0}")]
    Config(#[source] serde_json::Error),

    #[error("cannot produce JSON report: {0}")]
    Report(#[from] serde_json::Error),

    /// Individual failures were already reported per asset.
    #[error("{failed} of {total} assets failed")]
    Batch { failed: usize, total: usize },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Render(_) | Self::Batch { .. } => 10,
            Self::Write(_) | Self::CreateDir { .. } => 11,
            Self::Config(_) => 12,
            Self::Report(_) => 13,
        }
    }
}

// Engine write failures belong with the other I/O exits.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => Self::Write(msg),
            other => Self::Render(other),
        }
    }
}
