pub mod classify;
pub mod ordering;

pub use classify::{classify, classify_rule, has_shared_priority, ConflictRule};
pub use ordering::{order_for_execution, stages_in_report_order, ExecutionRule};

use crate::aggregation::Aggregation;
use crate::core::{distinct_owner_count, InterceptionRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,    // Multiple owners, priority-ordered
    Medium, // Multiple prefixes sharing a priority
    High,   // Multiple transpilers
}

impl RiskLevel {
    /// Report order: most severe first.
    pub const DESCENDING: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A target patched by more than one owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictGroup {
    pub target: String,
    pub records: Vec<InterceptionRecord>,
    pub risk_level: RiskLevel,
    pub rule: ConflictRule,
}

impl ConflictGroup {
    /// Build a group if the records come from at least two owners.
    pub fn from_records(target: &str, records: &[InterceptionRecord]) -> Option<Self> {
        if records.len() < 2 || distinct_owner_count(records) < 2 {
            return None;
        }
        let rule = classify_rule(records);
        Some(Self {
            target: target.to_string(),
            records: records.to_vec(),
            risk_level: rule.risk_level(),
            rule,
        })
    }

    pub fn owner_count(&self) -> usize {
        distinct_owner_count(&self.records)
    }
}

/// Per-level conflict counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
}

impl RiskDistribution {
    pub fn from_conflicts(conflicts: &[ConflictGroup]) -> Self {
        conflicts
            .iter()
            .fold(Self::default(), |mut dist, c| {
                match c.risk_level {
                    RiskLevel::High => dist.high_count += 1,
                    RiskLevel::Medium => dist.medium_count += 1,
                    RiskLevel::Low => dist.low_count += 1,
                }
                dist
            })
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::High => self.high_count,
            RiskLevel::Medium => self.medium_count,
            RiskLevel::Low => self.low_count,
        }
    }

    pub fn total(&self) -> usize {
        self.high_count + self.medium_count + self.low_count
    }
}

/// Every multi-owner target, most severe first, then by descending record
/// count. Equal entries keep aggregation order.
pub fn detect_conflicts(aggregation: &Aggregation) -> Vec<ConflictGroup> {
    let mut conflicts: Vec<ConflictGroup> = aggregation
        .targets()
        .iter()
        .filter_map(|t| ConflictGroup::from_records(&t.target, &t.records))
        .collect();

    conflicts.sort_by(|a, b| {
        b.risk_level
            .cmp(&a.risk_level)
            .then_with(|| b.records.len().cmp(&a.records.len()))
    });
    log::debug!("Detected {} conflicting targets", conflicts.len());
    conflicts
}
