use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for splatter operations
#[derive(Error, Diagnostic, Debug)]
pub enum SplatterError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(splatter::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(splatter::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to decode {path}: {message}")]
    #[diagnostic(code(splatter::decode))]
    Decode { path: PathBuf, message: String },

    #[error("Compose error: {message}")]
    #[diagnostic(code(splatter::compose))]
    Compose {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to encode {path}: {message}")]
    #[diagnostic(code(splatter::encode))]
    Encode { path: PathBuf, message: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(splatter::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(splatter::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl SplatterError {
    /// Whether this error only affects the sheet that raised it.
    ///
    /// Decode, compose and encode failures are isolated to one sheet; everything
    /// else invalidates the whole run.
    pub fn is_sheet_local(&self) -> bool {
        matches!(
            self,
            SplatterError::Decode { .. }
                | SplatterError::Compose { .. }
                | SplatterError::Encode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SplatterError>;
