use super::ScanSettings;
use crate::aggregation::{aggregate, Aggregation};
use crate::config::{load_config, load_config_from};
use crate::errors::ScanError;
use crate::formatting::{FormattingConfig, OutputFormatter, Severity, Stream};
use crate::io::OutputDestination;
use crate::output::{build_conflict_report, build_inventory_report, ReportContext};
use crate::registry::snapshot::SnapshotRegistry;
use crate::registry::PatchRegistry;
use crate::risk::{detect_conflicts, RiskDistribution, RiskLevel};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Which reports a scan produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Inventory,
    Conflicts,
    Both,
}

impl ReportKind {
    pub fn includes_inventory(self) -> bool {
        matches!(self, Self::Inventory | Self::Both)
    }

    pub fn includes_conflicts(self) -> bool {
        matches!(self, Self::Conflicts | Self::Both)
    }

    /// Prefix of the message shown when the whole scan fails.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Self::Conflicts => "Conflict scan failed",
            Self::Inventory | Self::Both => "Scan failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryOutcome {
    pub owner_count: usize,
    pub patch_count: usize,
    pub destination: String,
}

impl InventoryOutcome {
    pub fn message(&self) -> String {
        format!(
            "Scan complete! Found {} mods with {} patches. Results saved to {}",
            self.owner_count, self.patch_count, self.destination
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictOutcome {
    pub conflict_count: usize,
    pub high_risk_count: usize,
    pub destination: String,
}

impl ConflictOutcome {
    pub fn message(&self) -> String {
        format!(
            "Conflict scan complete! Found {} conflicts ({} high risk). Results saved to {}",
            self.conflict_count, self.high_risk_count, self.destination
        )
    }

    pub fn severity(&self) -> Severity {
        Severity::for_conflicts(self.high_risk_count, self.conflict_count)
    }
}

/// Result of one scan run; a report that was not requested is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub inventory: Option<InventoryOutcome>,
    pub conflicts: Option<ConflictOutcome>,
    pub failed_targets: usize,
}

/// Options collected from the command line for `scan`, `conflicts` and `all`.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub snapshot: PathBuf,
    pub kind: ReportKind,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub include_lifecycle: bool,
    pub plain: bool,
}

impl ScanRequest {
    fn settings(&self) -> Result<ScanSettings, ScanError> {
        let config = match &self.config {
            Some(path) => load_config_from(path)?,
            None => load_config(),
        };
        Ok(ScanSettings::from_config(&config)
            .with_output_dir(self.output_dir.clone())
            .with_lifecycle_included(self.include_lifecycle))
    }
}

pub fn write_inventory(
    aggregation: &Aggregation,
    context: &ReportContext,
    destination: &dyn OutputDestination,
) -> Result<InventoryOutcome, ScanError> {
    destination.write_str(&build_inventory_report(aggregation, context))?;
    Ok(InventoryOutcome {
        owner_count: aggregation.by_owner().len(),
        patch_count: aggregation.record_count(),
        destination: destination.description(),
    })
}

pub fn write_conflicts(
    aggregation: &Aggregation,
    context: &ReportContext,
    destination: &dyn OutputDestination,
) -> Result<ConflictOutcome, ScanError> {
    let conflicts = detect_conflicts(aggregation);
    let distribution = RiskDistribution::from_conflicts(&conflicts);
    destination.write_str(&build_conflict_report(aggregation, &conflicts, context))?;
    Ok(ConflictOutcome {
        conflict_count: conflicts.len(),
        high_risk_count: distribution.count(RiskLevel::High),
        destination: destination.description(),
    })
}

/// Aggregate the registry once and write the requested reports.
///
/// # Errors
///
/// Fails when the registry cannot list its methods or a destination
/// cannot be written. Per-target failures only show up in the reports.
pub fn run_reports<R: PatchRegistry + ?Sized>(
    registry: &R,
    settings: &ScanSettings,
    kind: ReportKind,
    context: &ReportContext,
    inventory: &dyn OutputDestination,
    conflicts: &dyn OutputDestination,
) -> Result<ScanOutcome, ScanError> {
    let aggregation = aggregate(registry, &settings.filter, settings.filter_enabled)?;

    let mut outcome = ScanOutcome {
        failed_targets: aggregation.failures().len(),
        ..ScanOutcome::default()
    };
    if kind.includes_inventory() {
        outcome.inventory = Some(write_inventory(&aggregation, context, inventory)?);
    }
    if kind.includes_conflicts() {
        outcome.conflicts = Some(write_conflicts(&aggregation, context, conflicts)?);
    }
    Ok(outcome)
}

/// Entry point for the scan commands. Prints one line per written report.
pub fn handle_scan(request: ScanRequest) -> Result<()> {
    let kind = request.kind;
    let outcome = execute(&request).context(kind.failure_prefix())?;

    let formatting = if request.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    for line in outcome_lines(&outcome, formatting.formatter(Stream::Stdout).as_ref()) {
        println!("{}", line);
    }
    if outcome.failed_targets > 0 {
        log::warn!(
            "{} patched methods could not be inspected; see the report for details",
            outcome.failed_targets
        );
    }
    Ok(())
}

fn execute(request: &ScanRequest) -> Result<ScanOutcome, ScanError> {
    let settings = request.settings()?;
    log::info!(
        "Scanning {} (lifecycle filter {})",
        request.snapshot.display(),
        if settings.filter_enabled { "on" } else { "off" }
    );

    let registry = SnapshotRegistry::from_path(&request.snapshot)?;
    let context = ReportContext::now(settings.filter_enabled);
    run_reports(
        &registry,
        &settings,
        request.kind,
        &context,
        &settings.inventory_destination(),
        &settings.conflicts_destination(),
    )
}

/// Console lines for a finished scan. Only the conflict line is coloured.
fn outcome_lines(outcome: &ScanOutcome, formatter: &dyn OutputFormatter) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(inventory) = &outcome.inventory {
        lines.push(inventory.message());
    }
    if let Some(conflicts) = &outcome.conflicts {
        lines.push(formatter.with_severity(conflicts.severity(), &conflicts.message()));
    }
    lines
}
