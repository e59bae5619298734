//! Liveness output while a run is in flight.
//!
//! A short run stays silent. Once the quiet threshold passes, one mark
//! per tick lands in the output pane so a long-running analyzer is
//! visibly alive. The task has no iteration bound of its own; it runs
//! until the run worker signals cancellation, and the join is
//! time-bounded so a wedged heartbeat cannot hold up result publication.

use crate::sink::OutputSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Mark emitted per tick once the quiet threshold has passed.
const LIVENESS_MARK: &str = ".";

/// Handle to a running heartbeat task.
pub struct Heartbeat {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
    join_bound: Duration,
}

impl Heartbeat {
    /// Spawn the heartbeat. It emits nothing until `threshold` has
    /// elapsed, then one mark per `interval`.
    pub fn spawn(
        sink: Arc<dyn OutputSink>,
        interval: Duration,
        threshold: Duration,
        join_bound: Duration,
    ) -> Heartbeat {
        let (cancel, mut cancelled) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut elapsed = Duration::ZERO;
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        elapsed += interval;
                        if elapsed > threshold {
                            sink.append(LIVENESS_MARK);
                        }
                    }
                    changed = cancelled.changed() => {
                        // A dropped sender counts as cancellation.
                        if changed.is_err() || *cancelled.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        Heartbeat {
            cancel,
            task,
            join_bound,
        }
    }

    /// Signal cancellation and wait for the task to wind down, up to the
    /// join bound. On overrun the task is aborted and the caller
    /// proceeds; results must not wait on a stuck ticker.
    pub async fn cancel(mut self) {
        let _ = self.cancel.send(true);

        if tokio::time::timeout(self.join_bound, &mut self.task)
            .await
            .is_err()
        {
            warn!(
                "heartbeat did not acknowledge cancellation within {:?}, aborting it",
                self.join_bound
            );
            self.task.abort();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
