//! Error types for patch scanning operations.
//!
//! Library code returns [`ScanError`]; the command layer wraps it in
//! `anyhow` for context. Errors fall into three groups:
//!
//! - **Per-target failures** (`Target`): recovered by the aggregator and
//!   recorded as a note in the report text.
//! - **Whole-scan failures** (`Io`, `Snapshot`): abort the scan and surface
//!   as a single failure notification.
//! - **Configuration failures** (`Config`): only fatal when the user named
//!   the config file explicitly.
//!
//! # Example
//!
//! ```rust
//! use patchscan::errors::ScanError;
//!
//! let err = ScanError::target("Foo.Bar", "missing priority");
//! assert_eq!(err.category(), "Target");
//! assert!(err.to_string().contains("Foo.Bar"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Error type for registry loading, aggregation and report output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// File system I/O errors (read, write, permissions, etc.)
    #[error("I/O error: {message}{}", display_path(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    /// The registry snapshot could not be read or decoded as a whole
    #[error("Snapshot error: {message}{}", display_path(.path))]
    Snapshot {
        message: String,
        path: Option<PathBuf>,
    },

    /// One target's patch records could not be resolved
    #[error("{target}: {message}")]
    Target { target: String, message: String },

    /// Configuration file errors
    #[error("Config error: {message}{}", display_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" (path: {})", p.display()),
        None => String::new(),
    }
}

impl ScanError {
    /// Create an I/O error with a message and path context.
    pub fn io_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a snapshot error.
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
            path: None,
        }
    }

    /// Create a snapshot error with path context.
    pub fn snapshot_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Snapshot {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Create a per-target failure.
    pub fn target(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Target {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error with path context.
    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Get the error message without context details.
    pub fn message(&self) -> &str {
        match self {
            Self::Io { message, .. } => message,
            Self::Snapshot { message, .. } => message,
            Self::Target { message, .. } => message,
            Self::Config { message, .. } => message,
        }
    }

    /// Get the associated path, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => path.as_ref(),
            Self::Snapshot { path, .. } => path.as_ref(),
            Self::Config { path, .. } => path.as_ref(),
            Self::Target { .. } => None,
        }
    }

    /// Get the error category name.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O",
            Self::Snapshot { .. } => "Snapshot",
            Self::Target { .. } => "Target",
            Self::Config { .. } => "Config",
        }
    }

    /// Whether the scan can continue past this error.
    ///
    /// Only per-target failures are expected mid-scan. Other kinds abort
    /// the scan when raised while loading input or writing reports.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Target { .. })
    }
}
