use super::{MethodRef, PatchRegistry, PatchSet, RawPatch};
use crate::core::Stage;
use crate::errors::ScanError;

/// In-memory registry for tests and for embedding the scanner in another tool.
///
/// Methods are enumerated in the order they were first added. A method can
/// be registered without patch info (the host reports it as patched but no
/// longer has records for it) or marked as failing, which makes
/// [`PatchRegistry::patch_info`] return an error for it.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    entries: Vec<MemoryEntry>,
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    method: MethodRef,
    patches: Option<PatchSet>,
    failure: Option<String>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_mut(&mut self, method: MethodRef) -> &mut MemoryEntry {
        let position = self.position_of(&method);
        match position {
            Some(i) => &mut self.entries[i],
            None => {
                let handle = self.entries.len();
                self.entries.push(MemoryEntry {
                    method: method.with_handle(handle),
                    patches: Some(PatchSet::default()),
                    failure: None,
                });
                &mut self.entries[handle]
            }
        }
    }

    fn position_of(&self, method: &MethodRef) -> Option<usize> {
        self.entries.iter().position(|e| {
            e.method
                .same_method(method.declaring_type.as_deref(), &method.name)
        })
    }

    /// Record one patch on `method` at `stage`.
    pub fn add_patch(&mut self, method: MethodRef, stage: Stage, patch: RawPatch) -> &mut Self {
        self.entry_mut(method)
            .patches
            .get_or_insert_with(PatchSet::default)
            .for_stage_mut(stage)
            .push(patch);
        self
    }

    /// Register a method whose patch info is unavailable.
    pub fn add_method_without_info(&mut self, method: MethodRef) -> &mut Self {
        self.entry_mut(method).patches = None;
        self
    }

    /// Make patch-info lookups for `method` fail with `message`.
    pub fn fail_method(&mut self, method: MethodRef, message: impl Into<String>) -> &mut Self {
        self.entry_mut(method).failure = Some(message.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PatchRegistry for MemoryRegistry {
    fn patched_methods(&self) -> Result<Vec<MethodRef>, ScanError> {
        Ok(self.entries.iter().map(|e| e.method.clone()).collect())
    }

    fn patch_info(&self, method: &MethodRef) -> Result<Option<PatchSet>, ScanError> {
        let handle = match self.entries.get(method.handle) {
            Some(e) if e.method.same_method(method.declaring_type.as_deref(), &method.name) => {
                Some(method.handle)
            }
            _ => self.position_of(method),
        };
        let entry = handle
            .map(|i| &self.entries[i])
            .ok_or_else(|| ScanError::target(method.key(), "method is not registered"))?;

        if let Some(message) = &entry.failure {
            return Err(ScanError::target(method.key(), message.clone()));
        }
        Ok(entry.patches.clone())
    }
}
