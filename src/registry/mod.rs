//! Patch registry abstraction.
//!
//! The host runtime owns the live registry of installed patches. Analysis
//! never talks to it directly: it consumes a [`PatchRegistry`], which can be
//! backed by an exported snapshot file ([`SnapshotRegistry`]) or built in
//! memory ([`MemoryRegistry`]) for tests and embedding.
//!
//! ```rust
//! use patchscan::registry::{HandlerRef, MemoryRegistry, MethodRef, PatchRegistry, RawPatch};
//! use patchscan::Stage;
//!
//! let mut registry = MemoryRegistry::new();
//! registry.add_patch(
//!     MethodRef::new(Some("Foo"), "Bar"),
//!     Stage::Before,
//!     RawPatch::new(Some("com.moda"), 400, 0)
//!         .with_handler(HandlerRef::new(Some("ModA.Patches"), Some("BarPrefix"))),
//! );
//!
//! let methods = registry.patched_methods().unwrap();
//! assert_eq!(methods[0].key(), "Foo.Bar");
//! ```

pub mod memory;
pub mod owner;
pub mod snapshot;

pub use memory::MemoryRegistry;
pub use owner::resolve_owner;
pub use snapshot::SnapshotRegistry;

use crate::core::{qualified_name, Stage, UNKNOWN};
use crate::errors::ScanError;
use serde::{Deserialize, Serialize};

/// Read-only source of patched methods and their patch records.
pub trait PatchRegistry {
    /// Enumerate every method that currently has patches installed.
    ///
    /// # Errors
    ///
    /// Failing here aborts the whole scan.
    fn patched_methods(&self) -> Result<Vec<MethodRef>, ScanError>;

    /// Fetch the per-stage patch records for one method.
    ///
    /// `Ok(None)` means the registry no longer has patch info for the method.
    ///
    /// # Errors
    ///
    /// An error here only affects this method; the scan continues.
    fn patch_info(&self, method: &MethodRef) -> Result<Option<PatchSet>, ScanError>;
}

/// Identity of a patched method as enumerated by a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRef {
    pub declaring_type: Option<String>,
    pub name: String,
    /// Registry-specific lookup slot; zero when unused
    #[serde(skip)]
    pub handle: usize,
}

impl MethodRef {
    pub fn new(declaring_type: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.map(str::to_string),
            name: name.into(),
            handle: 0,
        }
    }

    pub fn with_handle(mut self, handle: usize) -> Self {
        self.handle = handle;
        self
    }

    /// Target key used to group records: `"<DeclaringType>.<Method>"`.
    pub fn key(&self) -> String {
        qualified_name(self.declaring_type.as_deref(), Some(self.name.as_str()))
    }

    /// Same declaring type and name, ignoring the registry handle.
    pub fn same_method(&self, declaring_type: Option<&str>, name: &str) -> bool {
        self.declaring_type.as_deref() == declaring_type && self.name == name
    }
}

/// Raw patch lists for one method, one list per stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSet {
    #[serde(default)]
    pub prefixes: Vec<RawPatch>,
    #[serde(default)]
    pub postfixes: Vec<RawPatch>,
    #[serde(default)]
    pub transpilers: Vec<RawPatch>,
    #[serde(default)]
    pub finalizers: Vec<RawPatch>,
}

impl PatchSet {
    pub fn for_stage(&self, stage: Stage) -> &[RawPatch] {
        match stage {
            Stage::Before => &self.prefixes,
            Stage::After => &self.postfixes,
            Stage::CodeRewrite => &self.transpilers,
            Stage::Finalizer => &self.finalizers,
        }
    }

    pub fn for_stage_mut(&mut self, stage: Stage) -> &mut Vec<RawPatch> {
        match stage {
            Stage::Before => &mut self.prefixes,
            Stage::After => &mut self.postfixes,
            Stage::CodeRewrite => &mut self.transpilers,
            Stage::Finalizer => &mut self.finalizers,
        }
    }

    pub fn len(&self) -> usize {
        Stage::ALL.iter().map(|s| self.for_stage(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Host default priority for patches that do not declare one.
pub const DEFAULT_PRIORITY: i32 = 400;

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

/// One patch as the host registry reports it, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPatch {
    /// Owner id the patch was installed under
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub handler: Option<HandlerRef>,
}

impl RawPatch {
    pub fn new(owner: Option<&str>, priority: i32, index: i32) -> Self {
        Self {
            owner: owner.map(str::to_string),
            priority,
            index,
            handler: None,
        }
    }

    pub fn with_handler(mut self, handler: HandlerRef) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Bare name of the handler method, when known.
    pub fn handler_name(&self) -> Option<&str> {
        self.handler.as_ref().and_then(|h| h.name.as_deref())
    }

    /// `"<DeclaringType>.<Name>"` of the handler, `Unknown` parts filled in.
    pub fn handler_identity(&self) -> String {
        match &self.handler {
            Some(h) => qualified_name(h.declaring_type.as_deref(), h.name.as_deref()),
            None => format!("{UNKNOWN}.{UNKNOWN}"),
        }
    }
}

/// The function implementing a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerRef {
    #[serde(default)]
    pub declaring_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Assembly containing the handler's declaring type
    #[serde(default)]
    pub assembly: Option<AssemblyRef>,
}

impl HandlerRef {
    pub fn new(declaring_type: Option<&str>, name: Option<&str>) -> Self {
        Self {
            declaring_type: declaring_type.map(str::to_string),
            name: name.map(str::to_string),
            assembly: None,
        }
    }

    pub fn with_assembly(mut self, assembly: AssemblyRef) -> Self {
        self.assembly = Some(assembly);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyRef {
    #[serde(default)]
    pub name: Option<String>,
    /// On-disk location of the assembly file
    #[serde(default)]
    pub location: Option<String>,
}

impl AssemblyRef {
    pub fn new(name: Option<&str>, location: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            location: location.map(str::to_string),
        }
    }
}
