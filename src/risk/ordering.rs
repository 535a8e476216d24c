//! Runtime execution order of same-stage patches.
//!
//! The host chains patches of a stage by priority with the install index as
//! tie-break. Stages that run on the way out of the method unwind in the
//! opposite direction, so the rules come in two mirrored flavours.
//!
//! | Stage       | Rule                                           |
//! |-------------|------------------------------------------------|
//! | Prefix      | higher priority first, then ascending index    |
//! | Transpiler  | higher priority first, then ascending index    |
//! | Postfix     | lower priority first, then descending index    |
//! | Finalizer   | lower priority first, then descending index    |

use crate::core::{InterceptionRecord, Stage};
use std::cmp::Ordering;

/// Sort rule for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionRule {
    /// Priority descending, then index ascending
    PriorityDescending,
    /// Priority ascending, then index descending
    PriorityAscending,
}

impl ExecutionRule {
    pub fn for_stage(stage: Stage) -> Self {
        match stage {
            Stage::Before | Stage::CodeRewrite => Self::PriorityDescending,
            Stage::After | Stage::Finalizer => Self::PriorityAscending,
        }
    }

    /// Rule for a raw host stage name; unrecognized names use the prefix rule.
    pub fn for_stage_name(name: &str) -> Self {
        Stage::from_host_name(name)
            .map(Self::for_stage)
            .unwrap_or(Self::PriorityDescending)
    }

    pub fn compare(&self, a: &InterceptionRecord, b: &InterceptionRecord) -> Ordering {
        match self {
            Self::PriorityDescending => b
                .priority
                .cmp(&a.priority)
                .then_with(|| a.index.cmp(&b.index)),
            Self::PriorityAscending => a
                .priority
                .cmp(&b.priority)
                .then_with(|| b.index.cmp(&a.index)),
        }
    }

    /// One-line description used in report legends.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::PriorityDescending => "Higher priority executes first, then by index",
            Self::PriorityAscending => "Lower priority executes first, then by reverse index",
        }
    }
}

/// Records of one stage in the order the host runs them.
pub fn order_for_execution<'a, I>(stage: Stage, records: I) -> Vec<&'a InterceptionRecord>
where
    I: IntoIterator<Item = &'a InterceptionRecord>,
{
    let rule = ExecutionRule::for_stage(stage);
    let mut ordered: Vec<_> = records.into_iter().collect();
    ordered.sort_by(|a, b| rule.compare(a, b));
    ordered
}

/// Split a target's records per stage, alphabetically by host stage name,
/// each list in execution order.
pub fn stages_in_report_order(
    records: &[InterceptionRecord],
) -> Vec<(Stage, Vec<&InterceptionRecord>)> {
    let mut stages: Vec<Stage> = Stage::ALL
        .iter()
        .copied()
        .filter(|s| records.iter().any(|r| r.stage == *s))
        .collect();
    stages.sort_by_key(|s| s.host_name());

    stages
        .into_iter()
        .map(|stage| {
            let ordered = order_for_execution(stage, records.iter().filter(|r| r.stage == stage));
            (stage, ordered)
        })
        .collect()
}
