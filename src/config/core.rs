use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::filter::LifecycleFilter;
use crate::output::{CONFLICTS_FILE_NAME, INVENTORY_FILE_NAME};

/// Root configuration structure for patchscan
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PatchscanConfig {
    /// Lifecycle filtering configuration
    #[serde(default)]
    pub filters: Option<FilterConfig>,

    /// Report output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl PatchscanConfig {
    pub fn filters(&self) -> FilterConfig {
        self.filters.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    /// Skip patches on common lifecycle hooks (default: true)
    #[serde(default = "default_true")]
    pub exclude_common_lifecycle_methods: bool,

    /// Names added to the built-in lifecycle list
    #[serde(default)]
    pub extra_lifecycle_methods: Vec<String>,

    /// Replaces the built-in lifecycle list entirely when set
    #[serde(default)]
    pub lifecycle_methods: Option<Vec<String>>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_common_lifecycle_methods: true,
            extra_lifecycle_methods: Vec::new(),
            lifecycle_methods: None,
        }
    }
}

impl FilterConfig {
    /// Build the lifecycle filter this configuration describes.
    pub fn build_filter(&self) -> LifecycleFilter {
        let base = match &self.lifecycle_methods {
            Some(names) => LifecycleFilter::from_names(names.iter().cloned()),
            None => LifecycleFilter::default(),
        };
        base.extended_with(self.extra_lifecycle_methods.iter().cloned())
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_inventory_file() -> String {
    INVENTORY_FILE_NAME.to_string()
}

fn default_conflicts_file() -> String {
    CONFLICTS_FILE_NAME.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory reports are written to
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_inventory_file")]
    pub inventory_file: String,

    #[serde(default = "default_conflicts_file")]
    pub conflicts_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            inventory_file: default_inventory_file(),
            conflicts_file: default_conflicts_file(),
        }
    }
}
