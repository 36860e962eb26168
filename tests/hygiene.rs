//! Hygiene — enforces coding standards at test time.
//!
//! Scans the crate's production sources (`src/`, excluding `*_test.rs`
//! files) for antipatterns. Every pattern has a budget of zero; the budget
//! never grows.

use std::fs;
use std::path::{Path, PathBuf};

fn production_sources() -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no production sources found; is the test running from the crate root?");
    files
}

fn collect(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_source = path.extension().is_some_and(|e| e == "rs");
        let is_test_file = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with("_test.rs"));
        if is_source && !is_test_file {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn assert_absent(pattern: &str) {
    let mut hits = Vec::new();
    for (path, content) in production_sources() {
        for (line_no, line) in content.lines().enumerate() {
            if line.contains(pattern) {
                hits.push(format!("  {}:{}", path.display(), line_no + 1));
            }
        }
    }
    assert!(
        hits.is_empty(),
        "`{pattern}` is banned in production sources:\n{}",
        hits.join("\n")
    );
}

// Panics — these crash the process.

#[test]
fn no_unwrap() {
    assert_absent(".unwrap()");
}

#[test]
fn no_expect() {
    assert_absent(".expect(");
}

#[test]
fn no_panic_macro() {
    assert_absent("panic!(");
}

#[test]
fn no_unreachable() {
    assert_absent("unreachable!(");
}

#[test]
fn no_todo() {
    assert_absent("todo!(");
}

#[test]
fn no_unimplemented() {
    assert_absent("unimplemented!(");
}

// Silent loss — discards errors without inspecting.

#[test]
fn no_silent_discard() {
    assert_absent("let _ =");
}

#[test]
fn no_dot_ok() {
    assert_absent(".ok()");
}

// Style / structure.

#[test]
fn no_allow_dead_code() {
    assert_absent("#[allow(dead_code)]");
}
