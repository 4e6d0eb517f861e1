//! Error types for recording incremental units

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::units::IuKind;

/// Result type for recorder operations
pub type RecorderResult<T> = Result<T, RecorderError>;

/// Errors raised while recording incremental units
#[derive(Error, Debug)]
pub enum RecorderError {
    /// The target location could not be opened for writing
    #[error("cannot open recording file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Appending a record failed
    #[error("cannot write record to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The concepts of a dialogue act could not be rendered as JSON
    #[error("cannot serialize concepts: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A unit outside the module's declared input set was delivered
    #[error("{module} does not accept {kind} units")]
    UnacceptedUnit { module: &'static str, kind: IuKind },

    /// The separator would split a record across lines
    #[error("invalid field separator {separator:?}: must not contain a newline")]
    InvalidSeparator { separator: String },
}
