use super::{ReportContext, TextReport};
use crate::aggregation::Aggregation;

const TITLE: &str = "=== Harmony Patch Scanner Results ===";

/// Every surviving record, grouped under its owner.
///
/// Owners are listed in ordinal order; within an owner, records are sorted
/// by target and otherwise keep collection order.
pub fn build_inventory_report(aggregation: &Aggregation, context: &ReportContext) -> String {
    let mut report = TextReport::default();
    report.header(TITLE, context, &[]);
    report
        .line(format!(
            "Total Patched Methods: {}",
            aggregation.patched_method_count()
        ))
        .blank();

    for failure in aggregation.failures() {
        report.line(format!(
            "Error processing method {}: {}",
            failure.target, failure.message
        ));
    }

    for (owner, mut records) in aggregation.by_owner() {
        records.sort_by(|a, b| a.target.cmp(&b.target));

        report
            .line(format!("=== {owner} ==="))
            .line(format!("Total Patches: {}", records.len()))
            .blank();

        for record in records {
            report
                .line(format!("  Target: {}", record.target))
                .line(format!(
                    "    Type: {} | Priority: {} | Owner: {}",
                    record.stage,
                    record.priority,
                    record.owner_id_or_owner()
                ))
                .line(format!("    Patch: {}", record.handler_method))
                .blank();
        }
        report.blank();
    }

    report.finish()
}
