// src/error.rs

//! Error types for debsweep

use thiserror::Error;

/// Errors that terminate a debsweep run
#[derive(Debug, Error)]
pub enum Error {
    /// The package query command was missing or exited non-zero
    #[error("Failed to query installed packages: {0}")]
    Query(String),

    /// An elevated apt-get invocation could not be launched or exited non-zero
    #[error("Command '{command}' failed: {reason}")]
    Command { command: String, reason: String },

    /// Terminal I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
