//! Error types for pipeline runs.
//!
//! Only I/O and configuration problems are errors. Malformed input lines and
//! unresolved entries are ordinary outcomes recorded in the run statistics.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input file could not be opened or read.
    #[error("cannot read input file '{}': {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("cannot write output file '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid config '{}': {detail}", path.display())]
    Config { path: PathBuf, detail: String },

    /// The resolved document could not be serialized for the JSON dump.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Path of the file the failing operation was working on, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::MissingInput { path, .. }
            | Self::OutputWrite { path, .. }
            | Self::Config { path, .. } => Some(path),
            Self::Json(_) => None,
        }
    }
}

/// Convenience alias for results with [`PipelineError`].
pub type Result<T> = std::result::Result<T, PipelineError>;
