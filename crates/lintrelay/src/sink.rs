//! The output pane boundary.
//!
//! The run pipeline reports through this trait; the embedding side
//! decides where the text lands (an editor output window, a terminal).
//! Implementations are called from worker tasks and must be `Sync`.

use std::io::Write;
use std::sync::Mutex;

/// Append-only text destination for the human-readable run log.
pub trait OutputSink: Send + Sync {
    /// Append raw text. No newline is added.
    fn append(&self, text: &str);

    /// Reset the pane. Called once at the start of every run.
    fn clear(&self);
}

/// Writes to standard output, flushing per append so heartbeat marks
/// show up while a run is still in flight.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn append(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn clear(&self) {}
}

/// Captures everything in memory; the test double for the pane.
#[derive(Debug, Default)]
pub struct MemorySink {
    contents: Mutex<String>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    /// Everything appended since creation or the last clear.
    pub fn contents(&self) -> String {
        self.contents.lock().unwrap().clone()
    }
}

impl OutputSink for MemorySink {
    fn append(&self, text: &str) {
        self.contents.lock().unwrap().push_str(text);
    }

    fn clear(&self) {
        self.contents.lock().unwrap().clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
