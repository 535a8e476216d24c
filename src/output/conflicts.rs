use super::{ReportContext, TextReport};
use crate::aggregation::Aggregation;
use crate::core::Stage;
use crate::risk::{
    stages_in_report_order, ConflictGroup, ConflictRule, ExecutionRule, RiskDistribution,
    RiskLevel,
};

const TITLE: &str = "=== Duplicate/Conflicting Harmony Patches ===";
const BANNER: &str = "========================================";
const INTRO: [&str; 2] = [
    "This report shows methods that have multiple patches from different mods.",
    "These patches may conflict depending on their type and priority.",
];
const NO_CONFLICTS: &str =
    "No conflicting patches found! All methods have patches from a single mod.";

/// Conflict report over already-detected conflicts.
///
/// `conflicts` is expected in [`detect_conflicts`](crate::risk::detect_conflicts)
/// order; each risk section lists its targets in that order.
pub fn build_conflict_report(
    aggregation: &Aggregation,
    conflicts: &[ConflictGroup],
    context: &ReportContext,
) -> String {
    let mut report = TextReport::default();
    report.header(TITLE, context, &INTRO);

    for failure in aggregation.failures() {
        report.line(format!("Error processing method: {}", failure.message));
    }

    report
        .line(format!(
            "Total Methods Patched: {}",
            aggregation.target_count()
        ))
        .line(format!("Methods with Multiple Patches: {}", conflicts.len()))
        .blank();

    if conflicts.is_empty() {
        report.line(NO_CONFLICTS);
        return report.finish();
    }

    for level in RiskLevel::DESCENDING {
        write_risk_section(&mut report, conflicts, level);
    }
    write_summary(&mut report, &RiskDistribution::from_conflicts(conflicts));

    report.finish()
}

fn section_header(level: RiskLevel) -> String {
    format!("{} RISK CONFLICTS", level.label())
}

fn write_risk_section(report: &mut TextReport, conflicts: &[ConflictGroup], level: RiskLevel) {
    let at_level: Vec<_> = conflicts.iter().filter(|c| c.risk_level == level).collect();
    if at_level.is_empty() {
        return;
    }

    report
        .blank()
        .line(BANNER)
        .line(format!("=== {} ({}) ===", section_header(level), at_level.len()))
        .line(BANNER)
        .blank();

    for conflict in at_level {
        write_conflict(report, conflict);
    }
}

fn write_conflict(report: &mut TextReport, conflict: &ConflictGroup) {
    report
        .line(format!("Target Method: {}", conflict.target))
        .line(format!(
            "  Patches: {} from {} different mod(s)",
            conflict.records.len(),
            conflict.owner_count()
        ))
        .blank();

    for (stage, ordered) in stages_in_report_order(&conflict.records) {
        report.line(format!(
            "  {} Patches ({}) - Execution Order:",
            stage,
            ordered.len()
        ));
        for (position, record) in ordered.iter().enumerate() {
            report
                .line(format!("    [{}] Mod: {}", position + 1, record.owner))
                .line(format!("        Method: {}", record.handler_method))
                .line(format!(
                    "        Priority: {} | Index: {}",
                    record.priority, record.index
                ));
        }
        report.blank();
    }

    for line in warning_lines(conflict.rule) {
        report.line(line);
    }

    report.blank().line("---").blank();
}

/// Fixed annotation for the rule that classified a target.
pub fn warning_lines(rule: ConflictRule) -> &'static [&'static str] {
    match rule {
        ConflictRule::MultipleCodeRewrites => &[
            "  ⚠️ WARNING: Multiple transpilers detected! This is HIGH RISK for conflicts.",
            "     Transpilers modify IL code and multiple transpilers may interfere with each other.",
            "     Execution order shown above - first transpiler sees original IL, subsequent ones see modified IL.",
        ],
        ConflictRule::SharedBeforePriority => &[
            "  ⚠️ CAUTION: Multiple prefix patches. Execution order shown above.",
            "     Some patches have the same priority - execution order determined by index.",
            "     If any prefix returns false, execution stops and remaining prefixes won't run.",
        ],
        ConflictRule::MultipleBefore => &[
            "  ⚠️ CAUTION: Multiple prefix patches. Execution order shown above.",
            "     If any prefix returns false, execution stops and remaining prefixes won't run.",
        ],
        ConflictRule::Ordered => &[],
    }
}

fn write_summary(report: &mut TextReport, distribution: &RiskDistribution) {
    report
        .blank()
        .line(BANNER)
        .line("=== CONFLICT SUMMARY ===")
        .line(BANNER)
        .line(format!("Total Conflicts: {}", distribution.total()))
        .line(format!("  High Risk:   {}", distribution.high_count))
        .line(format!("  Medium Risk: {}", distribution.medium_count))
        .line(format!("  Low Risk:    {}", distribution.low_count))
        .blank()
        .line("Risk Level Definitions:")
        .line("  HIGH   - Multiple transpilers on same method (IL code conflicts)")
        .line("  MEDIUM - Multiple prefixes with same priority (execution order issues)")
        .line("  LOW    - Multiple patches with proper priority ordering")
        .blank()
        .line("Execution Order Notes:");

    for stage in Stage::ALL {
        let label = format!("{}:", stage.plural_label());
        report.line(format!(
            "  {:<13} {}",
            label,
            ExecutionRule::for_stage(stage).describe()
        ));
    }
}
