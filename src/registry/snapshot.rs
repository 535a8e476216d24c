//! Registry backed by an exported snapshot file.
//!
//! The host-side exporter dumps the live patch registry as JSON (or YAML):
//!
//! ```json
//! { "methods": [
//!   { "declaring_type": "Foo", "name": "Bar",
//!     "prefixes": [ { "owner": "com.moda", "priority": 100, "index": 0,
//!                     "handler": { "declaring_type": "ModA.Patches", "name": "BarPrefix",
//!                                  "assembly": { "name": "ModA",
//!                                                "location": "Modules/ModA/bin/Win64/ModA.dll" } } } ],
//!     "postfixes": [], "transpilers": [], "finalizers": [] } ] }
//! ```
//!
//! Method entries are kept as untyped values and decoded one at a time in
//! [`PatchRegistry::patch_info`], so a single malformed entry becomes a
//! per-target failure instead of rejecting the whole snapshot.

use super::{MethodRef, PatchRegistry, PatchSet};
use crate::core::UNKNOWN;
use crate::errors::ScanError;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    methods: Vec<Value>,
}

/// Snapshot input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from the file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotRegistry {
    source: Option<PathBuf>,
    methods: Vec<Value>,
}

impl SnapshotRegistry {
    /// Load a snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Io` if the file cannot be read and
    /// `ScanError::Snapshot` if it is not a snapshot document.
    pub fn from_path(path: &Path) -> Result<Self, ScanError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ScanError::io_with_path(format!("Failed to read snapshot: {}", e), path)
        })?;
        let mut registry = Self::from_str_with_format(&contents, SnapshotFormat::from_path(path))
            .map_err(|e| ScanError::snapshot_with_path(e.message(), path))?;
        registry.source = Some(path.to_path_buf());
        log::debug!(
            "Loaded {} patched methods from {}",
            registry.methods.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn from_json(contents: &str) -> Result<Self, ScanError> {
        Self::from_str_with_format(contents, SnapshotFormat::Json)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ScanError> {
        Self::from_str_with_format(contents, SnapshotFormat::Yaml)
    }

    fn from_str_with_format(contents: &str, format: SnapshotFormat) -> Result<Self, ScanError> {
        let document: SnapshotDocument = match format {
            SnapshotFormat::Json => serde_json::from_str(contents)
                .map_err(|e| ScanError::snapshot(format!("Invalid JSON snapshot: {}", e)))?,
            SnapshotFormat::Yaml => serde_yaml::from_str(contents)
                .map_err(|e| ScanError::snapshot(format!("Invalid YAML snapshot: {}", e)))?,
        };
        Ok(Self {
            source: None,
            methods: document.methods,
        })
    }

    /// File the snapshot was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn string_field<'a>(entry: &'a Value, field: &str) -> Option<&'a str> {
    entry.get(field).and_then(Value::as_str)
}

// Entries without a name enumerate as `UNKNOWN`, so they match that name too.
fn describes(entry: &Value, method: &MethodRef) -> bool {
    method.same_method(
        string_field(entry, "declaring_type"),
        string_field(entry, "name").unwrap_or(UNKNOWN),
    )
}

impl PatchRegistry for SnapshotRegistry {
    fn patched_methods(&self) -> Result<Vec<MethodRef>, ScanError> {
        Ok(self
            .methods
            .iter()
            .enumerate()
            .map(|(handle, entry)| {
                MethodRef::new(
                    string_field(entry, "declaring_type"),
                    string_field(entry, "name").unwrap_or(UNKNOWN),
                )
                .with_handle(handle)
            })
            .collect())
    }

    fn patch_info(&self, method: &MethodRef) -> Result<Option<PatchSet>, ScanError> {
        let entry = match self.methods.get(method.handle) {
            Some(entry) if describes(entry, method) => Some(entry),
            _ => self.methods.iter().find(|entry| describes(entry, method)),
        }
        .ok_or_else(|| ScanError::target(method.key(), "method is not in the snapshot"))?;

        if string_field(entry, "name").is_none() {
            return Err(ScanError::target(
                method.key(),
                "method entry has no name",
            ));
        }

        PatchSet::deserialize(entry)
            .map(Some)
            .map_err(|e| ScanError::target(method.key(), e.to_string()))
    }
}
