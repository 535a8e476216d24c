use super::RiskLevel;
use crate::core::{count_stage, InterceptionRecord, Stage};
use std::collections::HashSet;

/// Which classification rule decided a target's risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictRule {
    /// More than one transpiler rewrites the method body
    MultipleCodeRewrites,
    /// Several prefixes, and some stage has two patches at one priority
    SharedBeforePriority,
    /// Several prefixes, all ordered by distinct priorities
    MultipleBefore,
    /// Nothing beyond priority-ordered patches
    Ordered,
}

impl ConflictRule {
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Self::MultipleCodeRewrites => RiskLevel::High,
            Self::SharedBeforePriority => RiskLevel::Medium,
            Self::MultipleBefore | Self::Ordered => RiskLevel::Low,
        }
    }
}

/// True if any `(stage, priority)` pair occurs more than once.
///
/// Collisions are counted across all stages, but only raise the risk when
/// several prefixes are present as well; see [`classify_rule`].
pub fn has_shared_priority(records: &[InterceptionRecord]) -> bool {
    let mut seen = HashSet::new();
    records.iter().any(|r| !seen.insert((r.stage, r.priority)))
}

/// Determine which rule fires for a target's records. Rules are checked in
/// precedence order; the result does not depend on record order.
pub fn classify_rule(records: &[InterceptionRecord]) -> ConflictRule {
    let multiple_rewrites = count_stage(records, Stage::CodeRewrite) > 1;
    let multiple_before = count_stage(records, Stage::Before) > 1;

    if multiple_rewrites {
        ConflictRule::MultipleCodeRewrites
    } else if multiple_before && has_shared_priority(records) {
        ConflictRule::SharedBeforePriority
    } else if multiple_before {
        ConflictRule::MultipleBefore
    } else {
        ConflictRule::Ordered
    }
}

pub fn classify(records: &[InterceptionRecord]) -> RiskLevel {
    classify_rule(records).risk_level()
}
