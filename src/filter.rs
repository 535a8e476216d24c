//! Lifecycle-method filtering.
//!
//! Many mods patch the same host lifecycle hooks (module load, game start,
//! mission init) purely to register themselves. Those patches are expected
//! to be multi-owned and would drown the conflict report, so they can be
//! excluded by name.
//!
//! Matching is exact and case-sensitive. The built-in name list is
//! [`COMMON_LIFECYCLE_METHODS`]; configuration may extend or replace it.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Host lifecycle hooks, plus the `<Hook>Postfix` handler names mods
/// conventionally give their patches on them.
pub const COMMON_LIFECYCLE_METHODS: &[&str] = &[
    // SubModule lifecycle methods
    "OnSubModuleLoadPostfix",
    "OnSubModuleLoad",
    "OnSubModuleUnloadedPostfix",
    "OnSubModuleUnloaded",
    "RegisterSubModuleObjectsPostfix",
    "RegisterSubModuleObjects",
    "AfterRegisterSubModuleObjectsPostfix",
    "AfterRegisterSubModuleObjects",
    // Game lifecycle methods
    "OnGameStartPostfix",
    "OnGameStart",
    "OnGameLoadedPostfix",
    "OnGameLoaded",
    "OnGameEndPostfix",
    "OnGameEnd",
    "OnGameInitializationFinishedPostfix",
    "OnGameInitializationFinished",
    "OnAfterGameInitializationFinishedPostfix",
    "OnAfterGameInitializationFinished",
    "InitializeGameStarterPostfix",
    "InitializeGameStarter",
    "DoLoadingPostfix",
    "DoLoading",
    // Campaign lifecycle methods
    "OnCampaignStartPostfix",
    "OnCampaignStart",
    "BeginGameStartPostfix",
    "BeginGameStart",
    "OnNewGameCreatedPostfix",
    "OnNewGameCreated",
    // Mission lifecycle methods
    "OnBeforeMissionBehaviourInitializePostfix",
    "OnBeforeMissionBehaviourInitialize",
    "OnMissionBehaviourInitializePostfix",
    "OnMissionBehaviourInitialize",
    // Application/Screen lifecycle methods
    "OnApplicationTickPostfix",
    "OnApplicationTick",
    "OnBeforeInitialModuleScreenSetAsRootPostfix",
    "OnBeforeInitialModuleScreenSetAsRoot",
    "AfterAsyncTickTickPostfix",
    "AfterAsyncTickTick",
    // Multiplayer lifecycle methods
    "OnMultiplayerGameStartPostfix",
    "OnMultiplayerGameStart",
    // Configuration lifecycle methods
    "OnConfigChangedPostfix",
    "OnConfigChanged",
    // Initial state methods
    "OnInitialStatePostfix",
    "OnInitialState",
];

static COMMON_FILTER: Lazy<LifecycleFilter> =
    Lazy::new(|| LifecycleFilter::from_names(COMMON_LIFECYCLE_METHODS.iter().copied()));

/// Set of method names treated as harmless lifecycle hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleFilter {
    names: HashSet<String>,
}

impl Default for LifecycleFilter {
    fn default() -> Self {
        COMMON_FILTER.clone()
    }
}

impl LifecycleFilter {
    /// Shared instance built from [`COMMON_LIFECYCLE_METHODS`].
    pub fn common() -> &'static LifecycleFilter {
        &COMMON_FILTER
    }

    /// Build a filter from an explicit name list, ignoring the built-ins.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Add names on top of the current set.
    pub fn extended_with<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a whole target method should be dropped, by its bare name.
    pub fn should_exclude_target(&self, name: &str, filter_enabled: bool) -> bool {
        filter_enabled && self.contains(name)
    }

    /// Whether a single patch should be dropped, by its handler's bare name.
    pub fn should_exclude_handler(&self, name: &str, filter_enabled: bool) -> bool {
        filter_enabled && self.contains(name)
    }
}
