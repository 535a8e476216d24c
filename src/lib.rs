//! Harmony patch inventory and conflict analysis.
//!
//! The crate reads a snapshot of a game's patch registry, groups every
//! interception by the method it targets, and reports which methods are
//! patched by more than one mod and how risky that overlap is.

// Export modules for library usage
pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod filter;
pub mod formatting;
pub mod io;
pub mod output;
pub mod registry;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{InterceptionRecord, Stage};

pub use crate::aggregation::{aggregate, Aggregation, TargetFailure, TargetRecords};

pub use crate::errors::ScanError;

pub use crate::filter::{LifecycleFilter, COMMON_LIFECYCLE_METHODS};

pub use crate::registry::{
    resolve_owner, MemoryRegistry, MethodRef, PatchRegistry, PatchSet, RawPatch,
    SnapshotRegistry,
};

pub use crate::risk::{
    classify, detect_conflicts, order_for_execution, ConflictGroup, ConflictRule, ExecutionRule,
    RiskDistribution, RiskLevel,
};

pub use crate::output::{build_conflict_report, build_inventory_report, ReportContext};
