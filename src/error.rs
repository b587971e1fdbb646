use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a difficulty preset table.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read preset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preset file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preset table is empty")]
    Empty,

    #[error("preset key `{0}` is defined more than once")]
    DuplicateKey(String),

    #[error("preset `{key}` is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

/// Failures of session-level operations.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum SessionError {
    #[error("unknown difficulty preset `{0}`")]
    UnknownPreset(String),

    #[error("no game has been started in this session")]
    NotStarted,
}
