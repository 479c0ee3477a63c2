//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code; timers are deadlines
//! - The shell core stays headless (no terminal or runtime crates)
//! - No unwrap() in shell core production code
//!
//! These tests are designed to catch violations early in the development cycle.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Workspace root, two levels above this crate
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// A line that breaks a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File containing the line
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

/// Every `.rs` file under a workspace-relative directory
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    WalkDir::new(workspace_root().join(dir))
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Source lines outside `#[cfg(test)]` modules and comments
///
/// Everything after the first `#[cfg(test)]` is treated as test code, which
/// matches the layout used across the workspace.
#[must_use]
pub fn production_lines(source: &str) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(i, line)| (i + 1, line))
        .collect()
}

/// Scan production lines of every file under `dirs` for any of `needles`
#[must_use]
pub fn find_violations(dirs: &[&str], needles: &[&str]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for dir in dirs {
        for path in rust_files(dir) {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            for (line, text) in production_lines(&source) {
                if needles.iter().any(|n| text.contains(n)) {
                    violations.push(Violation {
                        path: path.clone(),
                        line,
                        text: text.trim().to_string(),
                    });
                }
            }
        }
    }
    violations
}

/// Render violations one per line for an assertion message
#[must_use]
pub fn report(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  {}:{}: {}", v.path.display(), v.line, v.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let source = "fn a() {}\n// note\n#[cfg(test)]\nmod tests { fn b() {} }\n";
        assert_eq!(production_lines(source), vec![(1, "fn a() {}")]);
    }
}
