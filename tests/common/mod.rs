// Shared fixtures for patchscan integration tests
#![allow(dead_code)]

use chrono::{Local, TimeZone};
use patchscan::core::{InterceptionRecord, Stage};
use patchscan::output::ReportContext;
use patchscan::registry::{AssemblyRef, HandlerRef, MemoryRegistry, MethodRef, RawPatch};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot with one conflict per risk level, a single-owner target, and a
/// lifecycle hook patched by two mods.
pub const MIXED_SNAPSHOT_JSON: &str = r#"{
  "methods": [
    {
      "declaring_type": "Foo",
      "name": "Bar",
      "prefixes": [
        { "owner": "com.moda", "priority": 400, "index": 0,
          "handler": { "declaring_type": "ModA.Patches", "name": "BarPrefix",
                       "assembly": { "name": "ModA", "location": "Modules/ModA/bin/Win64/ModA.dll" } } },
        { "owner": "com.modb", "priority": 400, "index": 1,
          "handler": { "declaring_type": "ModB.Patches", "name": "BarPrefix",
                       "assembly": { "name": "ModB", "location": "Modules/ModB/bin/Win64/ModB.dll" } } }
      ]
    },
    {
      "declaring_type": "Foo",
      "name": "Baz",
      "transpilers": [
        { "owner": "com.moda", "handler": { "declaring_type": "ModA.Patches", "name": "BazTranspiler",
            "assembly": { "name": "ModA", "location": "Modules/ModA/bin/Win64/ModA.dll" } } },
        { "owner": "com.modc", "priority": 800, "handler": { "declaring_type": "ModC.Patches", "name": "BazTranspiler" } }
      ]
    },
    {
      "declaring_type": "Foo",
      "name": "Qux",
      "postfixes": [
        { "owner": "com.moda", "priority": 400, "handler": { "declaring_type": "ModA.Patches", "name": "QuxPostfix",
            "assembly": { "name": "ModA", "location": "Modules/ModA/bin/Win64/ModA.dll" } } },
        { "owner": "com.modb", "priority": 800, "handler": { "declaring_type": "ModB.Patches", "name": "QuxPostfix",
            "assembly": { "name": "ModB", "location": "Modules/ModB/bin/Win64/ModB.dll" } } }
      ]
    },
    {
      "declaring_type": "Foo",
      "name": "Solo",
      "prefixes": [
        { "owner": "com.moda", "handler": { "declaring_type": "ModA.Patches", "name": "SoloPrefix" } },
        { "owner": "com.moda", "handler": { "declaring_type": "ModA.Patches", "name": "SoloPrefix2" } }
      ]
    },
    {
      "declaring_type": "Game",
      "name": "OnGameStart",
      "prefixes": [
        { "owner": "com.moda", "handler": { "declaring_type": "ModA.Patches", "name": "StartPrefix" } },
        { "owner": "com.modb", "handler": { "declaring_type": "ModB.Patches", "name": "StartPrefix" } }
      ]
    }
  ]
}"#;

/// Same scan scenario as a YAML export.
pub const SMALL_SNAPSHOT_YAML: &str = r#"
methods:
  - declaring_type: Foo
    name: Bar
    prefixes:
      - owner: com.moda
        handler:
          declaring_type: ModA.Patches
          name: BarPrefix
      - owner: com.modb
        handler:
          declaring_type: ModB.Patches
          name: BarPrefix
"#;

pub fn write_snapshot(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, contents).unwrap();
    path
}

/// Report context with a fixed timestamp.
pub fn fixed_context(filter_enabled: bool) -> ReportContext {
    ReportContext::new(
        Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(),
        filter_enabled,
    )
}

pub fn record(stage: Stage, owner: &str, priority: i32, index: i32) -> InterceptionRecord {
    InterceptionRecord::new(
        "Foo.Bar",
        stage,
        owner,
        format!("{owner}.Handler"),
        priority,
        index,
    )
}

pub fn patch(owner: &str, priority: i32, index: i32, handler: &str) -> RawPatch {
    let handler_type = format!("{owner}.Patches");
    RawPatch::new(Some(owner), priority, index)
        .with_handler(HandlerRef::new(Some(handler_type.as_str()), Some(handler)))
}

pub fn patch_in_assembly(owner: &str, handler: &str, assembly: &str, location: &str) -> RawPatch {
    let handler_type = format!("{owner}.Patches");
    RawPatch::new(Some(owner), 400, 0).with_handler(
        HandlerRef::new(Some(handler_type.as_str()), Some(handler))
            .with_assembly(AssemblyRef::new(Some(assembly), Some(location))),
    )
}

/// `Foo.Bar` with two prefixes at the same priority from different mods.
pub fn shared_prefix_registry() -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    registry
        .add_patch(
            MethodRef::new(Some("Foo"), "Bar"),
            Stage::Before,
            patch("ModA", 400, 0, "BarPrefix"),
        )
        .add_patch(
            MethodRef::new(Some("Foo"), "Bar"),
            Stage::Before,
            patch("ModB", 400, 1, "BarPrefix"),
        );
    registry
}
