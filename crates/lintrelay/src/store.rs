//! Shared diagnostic results.
//!
//! One writer (the run pipeline) replaces the whole set after each
//! completed run; any number of readers take cheap snapshots. Readers
//! never observe a half-replaced set: a snapshot clones the inner `Arc`
//! under the read lock and keeps pointing at the set it got, however
//! many runs complete afterwards.

use lintrelay_core::Diagnostic;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
pub struct DiagnosticStore {
    records: RwLock<Arc<Vec<Diagnostic>>>,
    generation: AtomicU64,
}

impl DiagnosticStore {
    pub fn new() -> DiagnosticStore {
        DiagnosticStore::default()
    }

    /// Replace the whole set, returning the new generation. An empty
    /// `records` clears previous results.
    pub fn replace(&self, records: Vec<Diagnostic>) -> u64 {
        let records = Arc::new(records);
        {
            let mut slot = self.records.write().unwrap();
            *slot = records;
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Snapshot of the current set.
    pub fn snapshot(&self) -> Arc<Vec<Diagnostic>> {
        self.records.read().unwrap().clone()
    }

    /// Records for `file` overlapping the zero-based, inclusive line
    /// range.
    pub fn in_range(&self, file: &Path, start_line: u32, end_line: u32) -> Vec<Diagnostic> {
        self.snapshot()
            .iter()
            .filter(|record| {
                record.file.as_path() == file && record.overlaps_lines(start_line, end_line)
            })
            .cloned()
            .collect()
    }

    /// Monotonic counter, bumped once per completed run.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(file: &str, line: u32) -> Diagnostic {
        Diagnostic {
            file: PathBuf::from(file),
            line,
            column: 0,
            severity: "warning".into(),
            message: "m".into(),
            check_name: "c".into(),
            code_line: String::new(),
            highlight_token: String::new(),
        }
    }

    #[test]
    fn test_replace_bumps_generation() {
        let store = DiagnosticStore::new();
        assert_eq!(store.generation(), 0);
        assert_eq!(store.replace(vec![record("a.cpp", 1)]), 1);
        assert_eq!(store.replace(vec![]), 2);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_replace_with_empty_set_clears() {
        let store = DiagnosticStore::new();
        store.replace(vec![record("a.cpp", 1), record("a.cpp", 2)]);
        assert_eq!(store.len(), 2);

        store.replace(vec![]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_replace() {
        let store = DiagnosticStore::new();
        store.replace(vec![record("a.cpp", 1)]);

        let snapshot = store.snapshot();
        store.replace(vec![]);

        assert_eq!(snapshot.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_in_range_filters_by_file_and_lines() {
        let store = DiagnosticStore::new();
        store.replace(vec![
            record("/w/a.cpp", 3),
            record("/w/a.cpp", 10),
            record("/w/b.cpp", 3),
        ]);

        let hits = store.in_range(Path::new("/w/a.cpp"), 0, 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, 3);

        let hits = store.in_range(Path::new("/w/a.cpp"), 3, 10);
        assert_eq!(hits.len(), 2);

        assert!(store.in_range(Path::new("/w/c.cpp"), 0, 100).is_empty());
    }
}
