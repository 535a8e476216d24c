//! CLI command implementations.
//!
//! Available commands:
//! - **scan**: write the inventory report
//! - **conflicts**: write the conflict report
//! - **all**: write both reports from a single aggregation pass
//! - **init**: write a default `.patchscan.toml`

pub mod init;
pub mod scan;

pub use init::init_config;
pub use scan::{
    handle_scan, run_reports, ConflictOutcome, InventoryOutcome, ReportKind, ScanOutcome,
    ScanRequest,
};

use crate::config::PatchscanConfig;
use crate::filter::LifecycleFilter;
use crate::io::FileDestination;
use std::path::PathBuf;

/// Effective settings for one scan, after config and CLI overrides.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub filter: LifecycleFilter,
    pub filter_enabled: bool,
    pub output_dir: PathBuf,
    pub inventory_file: String,
    pub conflicts_file: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::from_config(&PatchscanConfig::default())
    }
}

impl ScanSettings {
    pub fn from_config(config: &PatchscanConfig) -> Self {
        let filters = config.filters();
        let output = config.output();
        Self {
            filter: filters.build_filter(),
            filter_enabled: filters.exclude_common_lifecycle_methods,
            output_dir: output.directory,
            inventory_file: output.inventory_file,
            conflicts_file: output.conflicts_file,
        }
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }

    /// `--include-lifecycle` turns the filter off for one run.
    pub fn with_lifecycle_included(mut self, include_lifecycle: bool) -> Self {
        if include_lifecycle {
            self.filter_enabled = false;
        }
        self
    }

    pub fn inventory_destination(&self) -> FileDestination {
        FileDestination::in_directory(&self.output_dir, &self.inventory_file)
    }

    pub fn conflicts_destination(&self) -> FileDestination {
        FileDestination::in_directory(&self.output_dir, &self.conflicts_file)
    }
}
