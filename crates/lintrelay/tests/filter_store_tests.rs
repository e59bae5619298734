//! Integration tests for filter discovery on a real filesystem.
//!
//! These tests verify:
//! - Base and per-directory filter files merge in nearest-wins order
//! - Directories without a filter file are skipped silently
//! - Malformed files are contained and reported, not fatal

use lintrelay::files::OsFiles;
use lintrelay::filters::{ChainEntry, FilterChain, FilterStore};
use lintrelay_core::{CompiledFilter, apply_filters};
use std::path::Path;
use std::sync::Arc;

const FILE_NAME: &str = ".lintrelay-filters";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create dirs");
    }
    std::fs::write(path, content).expect("Failed to write fixture");
}

fn os_store(base: &Path) -> FilterStore {
    FilterStore::new(Arc::new(OsFiles), base, FILE_NAME)
}

/// Entries contributed by files under `root`. The ancestry walk also
/// visits the host directories above the tempdir; assertions must not
/// depend on what lives there.
fn entries_under(chain: &FilterChain, root: &Path) -> Vec<ChainEntry> {
    chain
        .entries
        .iter()
        .filter(|entry| entry.origin.starts_with(root))
        .cloned()
        .collect()
}

/// Load problems naming a file under `root`.
fn errors_under(chain: &FilterChain, root: &Path) -> Vec<String> {
    let root = root.to_string_lossy();
    chain
        .errors
        .iter()
        .filter(|message| message.contains(&*root))
        .cloned()
        .collect()
}

fn rules(entries: &[ChainEntry]) -> Vec<CompiledFilter> {
    entries.iter().map(|entry| entry.filter.clone()).collect()
}

#[test]
fn test_base_and_ancestors_layer_nearest_last() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let install = temp.path().join("install");
    let project = temp.path().join("project");

    write(
        &install.join(FILE_NAME),
        "Filters:\n  - Pattern: \"secret\"\n    Replacement: \"***\"\n",
    );
    write(
        &project.join(FILE_NAME),
        "Filters:\n  - Pattern: \"\\\\d+\"\n    Replacement: \"#\"\n",
    );
    std::fs::create_dir_all(project.join("src")).expect("Failed to create src dir");

    let store = os_store(&install.join(FILE_NAME));
    let chain = store.filters_for(&project.join("src/widget.cpp"));

    let ours = entries_under(&chain, temp.path());
    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0].origin, install.join(FILE_NAME));
    assert_eq!(ours[1].origin, project.join(FILE_NAME));
    assert!(errors_under(&chain, temp.path()).is_empty());

    assert_eq!(apply_filters("secret 123", &rules(&ours)), "*** #");
}

#[test]
fn test_deeper_file_overrides_by_running_last() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let project = temp.path().join("project");

    write(
        &project.join(FILE_NAME),
        "Filters:\n  - Pattern: \"noise\"\n    Replacement: \"quiet\"\n",
    );
    write(
        &project.join("src").join(FILE_NAME),
        "Filters:\n  - Pattern: \"quiet\"\n    Replacement: \"silent\"\n",
    );

    let store = os_store(&temp.path().join("absent-base"));
    let chain = store.filters_for(&project.join("src/widget.cpp"));

    let ours = entries_under(&chain, temp.path());
    assert_eq!(apply_filters("noise", &rules(&ours)), "silent");
}

#[test]
fn test_directories_without_filter_files_are_skipped() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let deep = temp.path().join("a/b/c/d");
    std::fs::create_dir_all(&deep).expect("Failed to create dirs");

    write(
        &temp.path().join("a").join(FILE_NAME),
        "Filters:\n  - Pattern: \"x\"\n    Replacement: \"y\"\n",
    );

    let store = os_store(&temp.path().join("absent-base"));
    let chain = store.filters_for(&deep.join("file.cpp"));

    let ours = entries_under(&chain, temp.path());
    assert_eq!(ours.len(), 1);
    assert_eq!(ours[0].origin, temp.path().join("a").join(FILE_NAME));
}

#[test]
fn test_malformed_file_is_reported_not_fatal() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let project = temp.path().join("project");

    write(&project.join(FILE_NAME), "Filters: [");
    write(
        &project.join("src").join(FILE_NAME),
        "Filters:\n  - Pattern: \"ok\"\n    Replacement: \"fine\"\n",
    );

    let store = os_store(&temp.path().join("absent-base"));
    let chain = store.filters_for(&project.join("src/widget.cpp"));

    let ours = entries_under(&chain, temp.path());
    let errors = errors_under(&chain, temp.path());
    assert_eq!(ours.len(), 1);
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].contains(&*project.join(FILE_NAME).to_string_lossy()),
        "error should name the offending file: {}",
        errors[0]
    );
    assert_eq!(apply_filters("ok", &rules(&ours)), "fine");
}

#[test]
fn test_absent_base_yields_empty_chain() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let lonely = temp.path().join("lonely");
    std::fs::create_dir_all(&lonely).expect("Failed to create dirs");

    let store = os_store(&temp.path().join("absent-base"));
    let chain = store.filters_for(&lonely.join("file.cpp"));

    assert!(entries_under(&chain, temp.path()).is_empty());
    assert!(errors_under(&chain, temp.path()).is_empty());
}
