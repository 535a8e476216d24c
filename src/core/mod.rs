pub mod stage;

pub use stage::Stage;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder used wherever the host could not tell us a type or method name.
pub const UNKNOWN: &str = "Unknown";

/// Normalized snapshot of one installed interception.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptionRecord {
    /// `"<DeclaringType>.<Method>"` of the intercepted method
    pub target: String,
    pub stage: Stage,
    /// Resolved owning module (see `registry::owner`)
    pub owner: String,
    /// Raw owner id the patch was installed under, if the host reported one
    #[serde(default)]
    pub owner_id: Option<String>,
    /// `"<DeclaringType>.<Name>"` of the handler function
    pub handler_method: String,
    pub priority: i32,
    /// Installation index assigned by the host registry; tie-break only
    pub index: i32,
}

impl InterceptionRecord {
    pub fn new(
        target: impl Into<String>,
        stage: Stage,
        owner: impl Into<String>,
        handler_method: impl Into<String>,
        priority: i32,
        index: i32,
    ) -> Self {
        Self {
            target: target.into(),
            stage,
            owner: owner.into(),
            owner_id: None,
            handler_method: handler_method.into(),
            priority,
            index,
        }
    }

    pub fn with_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Raw owner id, or the resolved owner when the host gave none.
    pub fn owner_id_or_owner(&self) -> &str {
        self.owner_id.as_deref().unwrap_or(&self.owner)
    }
}

/// Join a possibly-missing declaring type with a member name.
pub fn qualified_name(declaring_type: Option<&str>, name: Option<&str>) -> String {
    format!(
        "{}.{}",
        declaring_type.unwrap_or(UNKNOWN),
        name.unwrap_or(UNKNOWN)
    )
}

/// Number of distinct owners across a record list.
pub fn distinct_owner_count(records: &[InterceptionRecord]) -> usize {
    records
        .iter()
        .map(|r| r.owner.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Count records installed at `stage`.
pub fn count_stage(records: &[InterceptionRecord], stage: Stage) -> usize {
    records.iter().filter(|r| r.stage == stage).count()
}
