//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised by the call-stack tracker
///
/// These signal misuse by the interception layer (an unbalanced
/// push/pop sequence), never a user-facing condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("pop of '{found}' does not match active frame '{expected}'")]
    ProtocolViolation { expected: String, found: String },

    #[error("pop of '{name}' with no active frame")]
    EmptyStack { name: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Unsupported report version: {0}")]
    UnsupportedVersion(String),
}
