//! Owner-name resolution.
//!
//! The owner id a patch was installed under is often a reverse-DNS string
//! that says little to a player. The handler's assembly is a better clue,
//! and its install location usually sits under the mod's folder
//! (`Modules/<Mod>/bin/<Platform>/<Assembly>.dll`), so we prefer
//! `"<Mod> (<Assembly>)"` and fall back step by step:
//!
//! 1. mod folder + assembly name
//! 2. assembly name
//! 3. raw owner id
//! 4. `"Unknown"`

use super::RawPatch;
use crate::core::UNKNOWN;
use std::path::Path;

/// Resolve a human-readable owner for a patch. Never fails.
pub fn resolve_owner(patch: &RawPatch) -> String {
    let assembly = patch.handler.as_ref().and_then(|h| h.assembly.as_ref());

    if let Some(assembly_name) = assembly.and_then(|a| non_empty(a.name.as_deref())) {
        let folder = assembly
            .and_then(|a| non_empty(a.location.as_deref()))
            .and_then(mod_folder_name);
        return match folder {
            Some(folder) => format!("{folder} ({assembly_name})"),
            None => assembly_name.to_string(),
        };
    }

    patch
        .owner
        .clone()
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Folder three directories above the assembly file.
///
/// Snapshots are usually exported on Windows, so backslashes are treated as
/// separators regardless of the platform we run on.
fn mod_folder_name(location: &str) -> Option<String> {
    let normalized = location.replace('\\', "/");
    Path::new(&normalized)
        .parent()?
        .parent()?
        .parent()?
        .file_name()?
        .to_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
