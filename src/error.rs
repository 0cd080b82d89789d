//! Error types for tomatonote
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (nothing to time: wrong file, missing header, bad args)
//! - 4: Operation failed (I/O, serialization, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tomatonote CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tomatonote operations
///
/// The first four variants double as the start-precondition warnings shown
/// on the UI surface; their messages are user-facing text.
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("open a file first")]
    NoActiveDocument,

    #[error("open a Markdown file")]
    UnsupportedDocument,

    #[error("open a Markdown file with a front matter header")]
    MissingFrontMatter,

    #[error("place the cursor on a task line (e.g. `- [ ] task1`)")]
    NotATaskLine,

    #[error("front matter is malformed: {0}")]
    MalformedFrontMatter(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    #[error("invalid edit range: {0}")]
    InvalidEdit(String),

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::NoActiveDocument
            | Error::UnsupportedDocument
            | Error::MissingFrontMatter
            | Error::NotATaskLine
            | Error::MalformedFrontMatter(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::InvalidEdit(_)
            | Error::NoHomeDir
            | Error::LockFailed(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Yaml(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for tomatonote operations
pub type Result<T> = std::result::Result<T, Error>;
