//! The shell core must build and run without a terminal or async runtime.

use std::fs;

use architectural_enforcement::{find_violations, report, workspace_root};

const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm", "tokio"];

#[test]
fn test_core_manifest_has_no_surface_crates() {
    let manifest = fs::read_to_string(workspace_root().join("shell/core/Cargo.toml"))
        .expect("read shell/core/Cargo.toml");
    for line in manifest.lines().map(str::trim) {
        for name in SURFACE_CRATES {
            assert!(
                !line.starts_with(&format!("{name} ")) && !line.starts_with(&format!("{name}=")),
                "shell-core depends on {name}: {line}"
            );
        }
    }
}

#[test]
fn test_core_sources_do_not_import_surface_crates() {
    let needles: Vec<String> = SURFACE_CRATES.iter().map(|c| format!("{c}::")).collect();
    let needles: Vec<&str> = needles.iter().map(String::as_str).collect();
    let violations = find_violations(&["shell/core/src"], &needles);
    assert!(
        violations.is_empty(),
        "shell-core references a surface crate:\n{}",
        report(&violations)
    );
}

#[test]
fn test_core_does_not_unwrap() {
    let violations = find_violations(&["shell/core/src"], &[".unwrap()", ".expect("]);
    assert!(
        violations.is_empty(),
        "unwrap/expect in shell-core production code; propagate the error:\n{}",
        report(&violations)
    );
}
