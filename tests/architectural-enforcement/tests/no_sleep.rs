//! Autoplay and scroll handling run on deadlines the surface waits on.
//! A blocking or async sleep in production code means something is
//! polling instead.

use architectural_enforcement::{find_violations, report};

const PRODUCTION_DIRS: &[&str] = &["shell/core/src", "shell/replay/src", "tui/src"];

#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_violations(PRODUCTION_DIRS, &["::sleep(", ".sleep("]);
    assert!(
        violations.is_empty(),
        "sleep() found in production code; wait on a deadline instead:\n{}",
        report(&violations)
    );
}

#[test]
fn test_production_dirs_exist() {
    for dir in PRODUCTION_DIRS {
        assert!(
            !architectural_enforcement::rust_files(dir).is_empty(),
            "no sources under {dir}"
        );
    }
}
