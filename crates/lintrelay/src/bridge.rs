//! Presentation-layer adapter.
//!
//! The editor side of the relay: range queries over published records
//! and a change feed that fires once per completed run. Consumers hold
//! this instead of the engine so the coordination surface stays out of
//! presentation code.

use crate::engine::{Engine, EngineState, Invalidation};
use lintrelay_core::Diagnostic;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct EditorBridge {
    engine: Arc<Engine>,
}

impl EditorBridge {
    pub fn new(engine: Arc<Engine>) -> EditorBridge {
        EditorBridge { engine }
    }

    /// Records for `file` overlapping the zero-based, inclusive line
    /// range. Adorners call this per visible span; it never blocks on a
    /// run in flight.
    pub fn diagnostics_in_range(
        &self,
        file: &Path,
        start_line: u32,
        end_line: u32,
    ) -> Vec<Diagnostic> {
        self.engine.diagnostics_in_range(file, start_line, end_line)
    }

    /// Snapshot of all published records.
    pub fn diagnostics(&self) -> Arc<Vec<Diagnostic>> {
        self.engine.diagnostics()
    }

    /// Change feed; the value moves once per completed run.
    pub fn subscribe(&self) -> watch::Receiver<Invalidation> {
        self.engine.subscribe()
    }

    /// Wait until a run newer than generation `seen` completes and
    /// return its notification. `None` when the engine shuts down first.
    pub async fn next_refresh(&self, seen: u64) -> Option<Invalidation> {
        let mut rx = self.engine.subscribe();
        loop {
            {
                let current = rx.borrow_and_update();
                if current.generation > seen {
                    return Some(current.clone());
                }
            }
            if rx.changed().await.is_err() {
                return None;
            }
        }
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }
}
