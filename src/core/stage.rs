use serde::{Deserialize, Serialize};
use std::fmt;

/// Point relative to the target's execution at which an interception runs.
///
/// Reports use the host's names (`Prefix`, `Postfix`, `Transpiler`,
/// `Finalizer`); the serialized form uses the same names so snapshots and
/// report text agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Runs before the original; can skip it
    #[serde(rename = "Prefix")]
    Before,
    #[serde(rename = "Postfix")]
    After,
    /// Rewrites the target's instructions
    #[serde(rename = "Transpiler")]
    CodeRewrite,
    /// Runs whether or not the original threw
    #[serde(rename = "Finalizer")]
    Finalizer,
}

impl Stage {
    /// Stages in the order the host registry exposes them.
    pub const ALL: [Stage; 4] = [
        Stage::Before,
        Stage::After,
        Stage::CodeRewrite,
        Stage::Finalizer,
    ];

    /// Host-facing name used in report output.
    pub fn host_name(&self) -> &'static str {
        match self {
            Self::Before => "Prefix",
            Self::After => "Postfix",
            Self::CodeRewrite => "Transpiler",
            Self::Finalizer => "Finalizer",
        }
    }

    /// Plural form used in report legends.
    pub fn plural_label(&self) -> &'static str {
        match self {
            Self::Before => "Prefixes",
            Self::After => "Postfixes",
            Self::CodeRewrite => "Transpilers",
            Self::Finalizer => "Finalizers",
        }
    }

    pub fn from_host_name(name: &str) -> Option<Self> {
        match name {
            "Prefix" => Some(Self::Before),
            "Postfix" => Some(Self::After),
            "Transpiler" => Some(Self::CodeRewrite),
            "Finalizer" => Some(Self::Finalizer),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}
