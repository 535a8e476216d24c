//! Integration tests for conflict detection and the conflict report.

mod common;

use common::{fixed_context, patch, shared_prefix_registry, MIXED_SNAPSHOT_JSON};
use indoc::indoc;
use patchscan::aggregation::aggregate;
use patchscan::core::Stage;
use patchscan::filter::LifecycleFilter;
use patchscan::output::build_conflict_report;
use patchscan::registry::{MemoryRegistry, MethodRef, SnapshotRegistry};
use patchscan::risk::{detect_conflicts, ConflictRule, RiskLevel};
use pretty_assertions::assert_eq;

#[test]
fn test_shared_prefix_priority_report_text() {
    let registry = shared_prefix_registry();
    let aggregation = aggregate(&registry, LifecycleFilter::common(), true).unwrap();
    let conflicts = detect_conflicts(&aggregation);
    let report = build_conflict_report(&aggregation, &conflicts, &fixed_context(true));

    assert_eq!(
        report,
        indoc! {"
            === Duplicate/Conflicting Harmony Patches ===
            Scan Time: 2026-10-19 12:00:00

            This report shows methods that have multiple patches from different mods.
            These patches may conflict depending on their type and priority.

            Note: Common lifecycle method patches are excluded from this scan.

            Total Methods Patched: 1
            Methods with Multiple Patches: 1


            ========================================
            === MEDIUM RISK CONFLICTS (1) ===
            ========================================

            Target Method: Foo.Bar
              Patches: 2 from 2 different mod(s)

              Prefix Patches (2) - Execution Order:
                [1] Mod: ModA
                    Method: ModA.Patches.BarPrefix
                    Priority: 400 | Index: 0
                [2] Mod: ModB
                    Method: ModB.Patches.BarPrefix
                    Priority: 400 | Index: 1

              ⚠️ CAUTION: Multiple prefix patches. Execution order shown above.
                 Some patches have the same priority - execution order determined by index.
                 If any prefix returns false, execution stops and remaining prefixes won't run.

            ---


            ========================================
            === CONFLICT SUMMARY ===
            ========================================
            Total Conflicts: 1
              High Risk:   0
              Medium Risk: 1
              Low Risk:    0

            Risk Level Definitions:
              HIGH   - Multiple transpilers on same method (IL code conflicts)
              MEDIUM - Multiple prefixes with same priority (execution order issues)
              LOW    - Multiple patches with proper priority ordering

            Execution Order Notes:
              Prefixes:     Higher priority executes first, then by index
              Postfixes:    Lower priority executes first, then by reverse index
              Transpilers:  Higher priority executes first, then by index
              Finalizers:   Lower priority executes first, then by reverse index
        "}
    );
}

#[test]
fn test_mixed_snapshot_ranks_conflicts_by_risk() {
    let registry = SnapshotRegistry::from_json(MIXED_SNAPSHOT_JSON).unwrap();
    let aggregation = aggregate(&registry, LifecycleFilter::common(), true).unwrap();
    let conflicts = detect_conflicts(&aggregation);

    let summary: Vec<_> = conflicts
        .iter()
        .map(|c| (c.target.as_str(), c.risk_level, c.rule))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Foo.Baz", RiskLevel::High, ConflictRule::MultipleCodeRewrites),
            ("Foo.Bar", RiskLevel::Medium, ConflictRule::SharedBeforePriority),
            ("Foo.Qux", RiskLevel::Low, ConflictRule::Ordered),
        ]
    );

    let report = build_conflict_report(&aggregation, &conflicts, &fixed_context(true));
    assert!(report.contains("Total Methods Patched: 4\n"));
    assert!(report.contains("Methods with Multiple Patches: 3\n"));
    assert!(report.contains("=== HIGH RISK CONFLICTS (1) ==="));
    assert!(report.contains("=== LOW RISK CONFLICTS (1) ==="));
    assert!(!report.contains("Foo.Solo"));
    assert!(!report.contains("OnGameStart"));

    let high = report.find("HIGH RISK CONFLICTS").unwrap();
    let medium = report.find("MEDIUM RISK CONFLICTS").unwrap();
    let low = report.find("LOW RISK CONFLICTS").unwrap();
    assert!(high < medium && medium < low);
}

#[test]
fn test_transpilers_listed_in_execution_order() {
    let registry = SnapshotRegistry::from_json(MIXED_SNAPSHOT_JSON).unwrap();
    let aggregation = aggregate(&registry, LifecycleFilter::common(), true).unwrap();
    let conflicts = detect_conflicts(&aggregation);
    let report = build_conflict_report(&aggregation, &conflicts, &fixed_context(true));

    // Priority 800 runs before the default 400
    let modc = report.find("[1] Mod: com.modc").unwrap();
    let moda = report.find("[2] Mod: ModA (ModA)").unwrap();
    assert!(modc < moda);
    assert!(report.contains("Multiple transpilers detected! This is HIGH RISK for conflicts."));
}

#[test]
fn test_postfixes_run_lowest_priority_first() {
    let registry = SnapshotRegistry::from_json(MIXED_SNAPSHOT_JSON).unwrap();
    let aggregation = aggregate(&registry, LifecycleFilter::common(), true).unwrap();
    let qux = detect_conflicts(&aggregation)
        .into_iter()
        .find(|c| c.target == "Foo.Qux")
        .unwrap();

    let ordered = patchscan::risk::order_for_execution(Stage::After, &qux.records);
    let owners: Vec<_> = ordered.iter().map(|r| r.owner.as_str()).collect();
    assert_eq!(owners, vec!["ModA (ModA)", "ModB (ModB)"]);
}

#[test]
fn test_lifecycle_conflicts_appear_when_filter_disabled() {
    let registry = SnapshotRegistry::from_json(MIXED_SNAPSHOT_JSON).unwrap();
    let aggregation = aggregate(&registry, LifecycleFilter::common(), false).unwrap();
    let conflicts = detect_conflicts(&aggregation);
    let report = build_conflict_report(&aggregation, &conflicts, &fixed_context(false));

    assert_eq!(conflicts.len(), 4);
    assert!(report.contains("Target Method: Game.OnGameStart"));
    assert!(!report.contains("Note: Common lifecycle method patches"));
}

#[test]
fn test_single_owner_targets_are_not_conflicts() {
    let mut registry = MemoryRegistry::new();
    registry
        .add_patch(
            MethodRef::new(Some("Foo"), "Bar"),
            Stage::CodeRewrite,
            patch("ModA", 400, 0, "First"),
        )
        .add_patch(
            MethodRef::new(Some("Foo"), "Bar"),
            Stage::CodeRewrite,
            patch("ModA", 400, 1, "Second"),
        );

    let aggregation = aggregate(&registry, LifecycleFilter::common(), true).unwrap();
    let conflicts = detect_conflicts(&aggregation);
    let report = build_conflict_report(&aggregation, &conflicts, &fixed_context(true));

    assert!(conflicts.is_empty());
    assert!(report.ends_with(
        "Methods with Multiple Patches: 0\n\n\
         No conflicting patches found! All methods have patches from a single mod.\n"
    ));
}

#[test]
fn test_failed_targets_are_noted_and_scan_continues() {
    let mut registry = shared_prefix_registry();
    registry.fail_method(MethodRef::new(Some("Foo"), "Broken"), "bad metadata");

    let aggregation = aggregate(&registry, LifecycleFilter::common(), true).unwrap();
    let conflicts = detect_conflicts(&aggregation);
    let report = build_conflict_report(&aggregation, &conflicts, &fixed_context(true));

    assert_eq!(aggregation.failures().len(), 1);
    assert_eq!(conflicts.len(), 1);
    assert!(report.contains("Error processing method: bad metadata\nTotal Methods Patched: 1\n"));
}

#[test]
fn test_prefix_pair_with_postfix_scenario() {
    let mut registry = MemoryRegistry::new();
    registry
        .add_patch(
            MethodRef::new(Some("Foo"), "Bar"),
            Stage::Before,
            patch("ModA", 100, 0, "BarPrefix"),
        )
        .add_patch(
            MethodRef::new(Some("Foo"), "Bar"),
            Stage::Before,
            patch("ModB", 100, 1, "BarPrefix"),
        )
        .add_patch(
            MethodRef::new(Some("Foo"), "Bar"),
            Stage::After,
            patch("ModA", 0, 2, "BarPostfix"),
        );

    let aggregation = aggregate(&registry, LifecycleFilter::common(), true).unwrap();
    let conflicts = detect_conflicts(&aggregation);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].risk_level, RiskLevel::Medium);

    let report = build_conflict_report(&aggregation, &conflicts, &fixed_context(true));
    let postfix = report.find("  Postfix Patches (1) - Execution Order:").unwrap();
    let prefix = report.find("  Prefix Patches (2) - Execution Order:").unwrap();
    assert!(postfix < prefix);
    let prefix_block = &report[prefix..];
    let moda = prefix_block.find("[1] Mod: ModA").unwrap();
    let modb = prefix_block.find("[2] Mod: ModB").unwrap();
    assert!(moda < modb);
    assert!(report.contains("  Patches: 3 from 2 different mod(s)"));
}
