//! Run coordination.
//!
//! One analyzer invocation at a time, off the caller's thread, with
//! liveness feedback while the child runs and atomic publication of the
//! results when it exits. Callers fire a request and walk away; progress
//! and failures land in the output sink, structured records land in the
//! shared store, and a change notification tells consumers to re-query.

use crate::analyzer::{AnalyzerInvoker, analyzer_args, display_args};
use crate::config::EngineConfig;
use crate::files::Files;
use crate::filters::FilterStore;
use crate::heartbeat::Heartbeat;
use crate::sink::OutputSink;
use crate::store::DiagnosticStore;
use lintrelay_core::{Diagnostic, ParseOptions, apply_filters, parse_report};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, error, info};

// ============================================================================
// Invalidation
// ============================================================================

/// Whole-document refresh notification, sent once per completed run.
///
/// Anything derived from the previous record set is stale once this
/// fires; consumers re-query rather than patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invalidation {
    /// File the run analyzed. `None` until the first run completes.
    pub file: Option<PathBuf>,
    /// Monotonic run counter; moves once per completed run.
    pub generation: u64,
}

/// Point-in-time view of the engine for health surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// True while a run is in flight.
    pub busy: bool,
    /// Target of the in-flight run, if any.
    pub current_file: Option<PathBuf>,
    /// Generation of the last completed run.
    pub generation: u64,
    /// Number of records currently published.
    pub findings: usize,
}

// ============================================================================
// Engine
// ============================================================================

/// Coordinates analyzer runs and owns the published results.
pub struct Engine {
    config: EngineConfig,
    invoker: Arc<dyn AnalyzerInvoker>,
    sink: Arc<dyn OutputSink>,
    filters: FilterStore,
    store: DiagnosticStore,
    busy: Arc<AtomicBool>,
    current: Arc<Mutex<Option<PathBuf>>>,
    invalidate_tx: watch::Sender<Invalidation>,
    /// Kept so the channel stays open with no outside subscribers.
    _invalidate_rx: watch::Receiver<Invalidation>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        invoker: Arc<dyn AnalyzerInvoker>,
        files: Arc<dyn Files>,
        sink: Arc<dyn OutputSink>,
    ) -> Arc<Engine> {
        let filters =
            FilterStore::new(files, &config.base_filters, config.filters_file_name.clone());
        let (invalidate_tx, invalidate_rx) = watch::channel(Invalidation::default());

        Arc::new(Engine {
            config,
            invoker,
            sink,
            filters,
            store: DiagnosticStore::new(),
            busy: Arc::new(AtomicBool::new(false)),
            current: Arc::new(Mutex::new(None)),
            invalidate_tx,
            _invalidate_rx: invalidate_rx,
        })
    }

    /// Ask for a run of the analyzer against `file` (an absolute path,
    /// the way editors hand out active-document paths).
    ///
    /// Fire-and-forget: the caller is never blocked. While a run is in
    /// flight further requests are dropped, not queued. A `None` file
    /// means there is nothing to analyze and the pane says so.
    pub fn request_run(self: &Arc<Self>, file: Option<PathBuf>) {
        let Some(file) = file else {
            self.sink.append(">> No source file available!\n");
            info!("run requested without an active source file");
            return;
        };

        // Claim the flag before any other work so two racing requests
        // cannot both start a run.
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("run already in progress, dropping request for {}", file.display());
            return;
        }

        *self.current.lock().unwrap() = Some(file.clone());

        // Fresh pane for the new run, banner first.
        self.sink.clear();
        let args = analyzer_args(&file);
        self.sink.append(&format!(
            ">> Running {} with arguments: '{}'\n",
            self.config.analyzer.display(),
            display_args(&args)
        ));
        info!("starting analyzer run for {}", file.display());

        let engine = Arc::clone(self);
        tokio::spawn(async move {
            // Clears the flag on every exit path, including a panic in
            // the pipeline. Publication happens first; the flag is the
            // last thing to move.
            let _guard = RunGuard {
                busy: Arc::clone(&engine.busy),
                current: Arc::clone(&engine.current),
            };
            engine.run_pipeline(file, args).await;
        });
    }

    async fn run_pipeline(&self, file: PathBuf, args: Vec<OsString>) {
        let heartbeat = Heartbeat::spawn(
            Arc::clone(&self.sink),
            self.config.heartbeat_interval,
            self.config.heartbeat_threshold,
            self.config.heartbeat_join_bound,
        );

        let outcome = self.invoker.invoke(&self.config.analyzer, &args).await;

        // The child is gone either way; stop the liveness marks before
        // anything is published.
        heartbeat.cancel().await;

        let raw = match outcome {
            Ok(raw) => raw,
            Err(err) => {
                self.sink.append(&format!(
                    ">> Failed to launch {}: {}\n",
                    self.config.analyzer.display(),
                    err
                ));
                error!("analyzer launch failed for {}: {}", file.display(), err);
                return;
            }
        };

        // Structured records first, rendered text second: a consumer
        // woken by the pane already sees the new set.
        let records = parse_report(
            &raw,
            &ParseOptions {
                path_style: self.config.path_style,
            },
        );
        let count = records.len();
        let generation = self.store.replace(records);

        let chain = self.filters.filters_for(&file);
        for problem in &chain.errors {
            self.sink.append(&format!(">> {}\n", problem));
        }

        self.sink.append("\n");
        self.sink.append(&apply_filters(&raw, &chain.filters()));
        self.sink.append("\n>> Finished\n");

        let _ = self.invalidate_tx.send(Invalidation {
            file: Some(file.clone()),
            generation,
        });

        info!(
            "analyzer run finished for {}: {} findings, generation {}",
            file.display(),
            count,
            generation
        );
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Records for `file` overlapping the zero-based, inclusive line
    /// range. Always answers from the last published set, even while a
    /// run is in flight.
    pub fn diagnostics_in_range(
        &self,
        file: &Path,
        start_line: u32,
        end_line: u32,
    ) -> Vec<Diagnostic> {
        self.store.in_range(file, start_line, end_line)
    }

    /// Snapshot of all published records.
    pub fn diagnostics(&self) -> Arc<Vec<Diagnostic>> {
        self.store.snapshot()
    }

    /// Change feed for presentation layers: the value moves once per
    /// completed run.
    pub fn subscribe(&self) -> watch::Receiver<Invalidation> {
        self.invalidate_tx.subscribe()
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            busy: self.busy.load(Ordering::SeqCst),
            current_file: self.current.lock().unwrap().clone(),
            generation: self.store.generation(),
            findings: self.store.len(),
        }
    }
}

/// Releases the busy flag when the run worker leaves scope, whatever
/// path it takes out.
struct RunGuard {
    busy: Arc<AtomicBool>,
    current: Arc<Mutex<Option<PathBuf>>>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
        self.busy.store(false, Ordering::SeqCst);
    }
}
