mod core;
mod loader;

pub use self::core::{FilterConfig, OutputConfig, PatchscanConfig};
pub use self::loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};

/// Default configuration written by `patchscan init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Patchscan Configuration

[filters]
# Skip patches on common lifecycle hooks (OnSubModuleLoad, OnGameStart, ...)
exclude_common_lifecycle_methods = true
# Additional hook names to treat as lifecycle methods
extra_lifecycle_methods = []

[output]
directory = "logs"
inventory_file = "AllHarmonyPatches.txt"
conflicts_file = "DuplicateHarmonyPatches.txt"
"#;
