//! Registry aggregation: filter patch records and group them by target method.
//!
//! Each patched method is processed independently. A method whose records
//! cannot be resolved is recorded as a [`TargetFailure`] and skipped; the
//! rest of the scan carries on. Only failing to enumerate the registry at
//! all aborts the scan.

use crate::core::{InterceptionRecord, Stage};
use crate::errors::ScanError;
use crate::filter::LifecycleFilter;
use crate::registry::{resolve_owner, MethodRef, PatchRegistry, PatchSet};
use std::collections::{BTreeMap, HashMap};

/// All records for one target method, in collection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRecords {
    pub target: String,
    pub records: Vec<InterceptionRecord>,
}

/// A target method whose records could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    pub target: String,
    pub message: String,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    targets: Vec<TargetRecords>,
    positions: HashMap<String, usize>,
    failures: Vec<TargetFailure>,
    patched_method_count: usize,
}

impl Aggregation {
    /// Targets in the order they were first seen.
    pub fn targets(&self) -> &[TargetRecords] {
        &self.targets
    }

    pub fn get(&self, target: &str) -> Option<&[InterceptionRecord]> {
        self.positions
            .get(target)
            .map(|&i| self.targets[i].records.as_slice())
    }

    pub fn contains(&self, target: &str) -> bool {
        self.positions.contains_key(target)
    }

    pub fn failures(&self) -> &[TargetFailure] {
        &self.failures
    }

    /// Methods the registry enumerated, before any filtering.
    pub fn patched_method_count(&self) -> usize {
        self.patched_method_count
    }

    /// Distinct target keys that survived filtering.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn record_count(&self) -> usize {
        self.targets.iter().map(|t| t.records.len()).sum()
    }

    /// Records regrouped by owner, owners in ordinal order.
    pub fn by_owner(&self) -> BTreeMap<&str, Vec<&InterceptionRecord>> {
        let mut grouped: BTreeMap<&str, Vec<&InterceptionRecord>> = BTreeMap::new();
        for record in self.targets.iter().flat_map(|t| t.records.iter()) {
            grouped.entry(record.owner.as_str()).or_default().push(record);
        }
        grouped
    }

    /// Store records under `target`. Overloads share a key, so a later
    /// overload replaces the earlier list and keeps its position.
    fn insert(&mut self, target: String, records: Vec<InterceptionRecord>) {
        match self.positions.get(&target) {
            Some(&i) => {
                log::debug!("Overload of {} replaces an earlier patch list", target);
                self.targets[i].records = records;
            }
            None => {
                self.positions.insert(target.clone(), self.targets.len());
                self.targets.push(TargetRecords { target, records });
            }
        }
    }

    fn record_failure(&mut self, error: ScanError, method: &MethodRef) {
        let target = match &error {
            ScanError::Target { target, .. } => target.clone(),
            _ => method.key(),
        };
        if error.is_recoverable() {
            log::warn!("Skipping {}: {}", target, error.message());
        } else {
            log::warn!(
                "Skipping {} after {} error: {}",
                target,
                error.category(),
                error.message()
            );
        }
        self.failures.push(TargetFailure {
            target,
            message: error.message().to_string(),
        });
    }
}

/// Collect every registry method's surviving records, grouped by target key.
///
/// # Errors
///
/// Returns an error only when the registry cannot enumerate its methods.
/// Per-target failures are captured in [`Aggregation::failures`].
pub fn aggregate<R: PatchRegistry + ?Sized>(
    registry: &R,
    filter: &LifecycleFilter,
    filter_enabled: bool,
) -> Result<Aggregation, ScanError> {
    let methods = registry.patched_methods()?;
    let mut aggregation = Aggregation {
        patched_method_count: methods.len(),
        ..Aggregation::default()
    };

    for method in &methods {
        if filter.should_exclude_target(&method.name, filter_enabled) {
            log::debug!("Excluding lifecycle target {}", method.key());
            continue;
        }

        match registry.patch_info(method) {
            Ok(Some(patches)) => {
                let records = collect_records(method, &patches, filter, filter_enabled);
                aggregation.insert(method.key(), records);
            }
            Ok(None) => log::debug!("No patch info for {}", method.key()),
            Err(e) => aggregation.record_failure(e, method),
        }
    }

    log::info!(
        "Aggregated {} records across {} targets ({} failed)",
        aggregation.record_count(),
        aggregation.target_count(),
        aggregation.failures.len()
    );
    Ok(aggregation)
}

/// Normalize one method's raw patches, dropping lifecycle-named handlers.
pub fn collect_records(
    method: &MethodRef,
    patches: &PatchSet,
    filter: &LifecycleFilter,
    filter_enabled: bool,
) -> Vec<InterceptionRecord> {
    let target = method.key();
    Stage::ALL
        .iter()
        .flat_map(|&stage| patches.for_stage(stage).iter().map(move |p| (stage, p)))
        .filter(|(_, patch)| {
            !patch
                .handler_name()
                .is_some_and(|name| filter.should_exclude_handler(name, filter_enabled))
        })
        .map(|(stage, patch)| InterceptionRecord {
            target: target.clone(),
            stage,
            owner: resolve_owner(patch),
            owner_id: patch.owner.clone(),
            handler_method: patch.handler_identity(),
            priority: patch.priority,
            index: patch.index,
        })
        .collect()
}
