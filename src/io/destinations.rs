//! Output destination abstractions for report writing.
//!
//! Reports are built completely in memory and then handed to an
//! [`OutputDestination`] in a single call, so a destination never sees a
//! partial report.
//!
//! # Example
//!
//! ```rust
//! use patchscan::io::destinations::{MemoryDestination, OutputDestination};
//!
//! let dest = MemoryDestination::new();
//! dest.write_str("=== Report ===\n").unwrap();
//! assert!(dest.get_content().contains("Report"));
//! ```

use crate::errors::ScanError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Trait for destinations that receive a finished report.
pub trait OutputDestination: Send + Sync {
    /// Write the full report content.
    fn write_str(&self, content: &str) -> Result<(), ScanError>;

    /// Get a description of the destination for messages.
    fn description(&self) -> String;
}

/// File system output destination.
///
/// Creates the parent directory if needed, then writes the whole report.
/// The file handle is closed before `write_str` returns.
#[derive(Debug, Clone)]
pub struct FileDestination {
    path: PathBuf,
}

impl FileDestination {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Destination for `file_name` inside `directory`.
    pub fn in_directory(directory: &Path, file_name: &str) -> Self {
        Self::new(directory.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputDestination for FileDestination {
    fn write_str(&self, content: &str) -> Result<(), ScanError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ScanError::io_with_path(format!("Failed to create output directory: {}", e), parent)
            })?;
        }

        let mut file = fs::File::create(&self.path).map_err(|e| {
            ScanError::io_with_path(format!("Failed to create file: {}", e), &self.path)
        })?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| {
                ScanError::io_with_path(format!("Failed to write to file: {}", e), &self.path)
            })?;
        log::debug!("Wrote {} bytes to {}", content.len(), self.path.display());
        Ok(())
    }

    fn description(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory output destination for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryDestination {
    buffer: Arc<RwLock<String>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current content of the buffer.
    pub fn get_content(&self) -> String {
        self.buffer.read().expect("RwLock poisoned").clone()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.read().expect("RwLock poisoned").is_empty()
    }
}

impl OutputDestination for MemoryDestination {
    fn write_str(&self, content: &str) -> Result<(), ScanError> {
        self.buffer
            .write()
            .expect("RwLock poisoned")
            .push_str(content);
        Ok(())
    }

    fn description(&self) -> String {
        "memory".to_string()
    }
}
