//! Engine configuration: where the analyzer and the filter files live,
//! and how the run pipeline paces itself.

use eyre::WrapErr;
use lintrelay_core::PathStyle;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Analyzer executable name, resolved next to the running binary when no
/// explicit path is configured.
pub const ANALYZER_EXE: &str = "clang-tidy";

/// Filter files are discovered by this exact name: once next to the
/// running binary (the base set) and once per ancestor directory of the
/// analyzed file.
pub const FILTERS_FILE_NAME: &str = ".lintrelay-filters";

/// Cadence of the liveness heartbeat while a run is in flight.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(500);

/// Quiet period before the heartbeat starts emitting liveness marks.
pub const HEARTBEAT_THRESHOLD: Duration = Duration::from_secs(1);

/// Upper bound on waiting for the heartbeat to acknowledge cancellation
/// before results are published anyway.
pub const HEARTBEAT_JOIN_BOUND: Duration = Duration::from_secs(2);

/// Everything the engine needs to run the analyzer against one file.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Analyzer executable.
    pub analyzer: PathBuf,
    /// Base filter file, loaded once at startup. A missing file means an
    /// empty base set.
    pub base_filters: PathBuf,
    /// File name probed in each ancestor directory of the analyzed file.
    pub filters_file_name: String,
    /// Liveness heartbeat cadence.
    pub heartbeat_interval: Duration,
    /// Quiet period before liveness marks start.
    pub heartbeat_threshold: Duration,
    /// Bound on the post-cancellation heartbeat join.
    pub heartbeat_join_bound: Duration,
    /// Separator normalization applied to reported paths.
    pub path_style: PathStyle,
}

impl EngineConfig {
    /// Configuration rooted at an installation directory: the analyzer
    /// binary and the base filter file sit next to the running
    /// executable.
    pub fn for_install_dir(install_dir: &Path) -> EngineConfig {
        EngineConfig {
            analyzer: install_dir.join(analyzer_exe_name()),
            base_filters: install_dir.join(FILTERS_FILE_NAME),
            filters_file_name: FILTERS_FILE_NAME.to_string(),
            heartbeat_interval: HEARTBEAT_INTERVAL,
            heartbeat_threshold: HEARTBEAT_THRESHOLD,
            heartbeat_join_bound: HEARTBEAT_JOIN_BOUND,
            path_style: PathStyle::default(),
        }
    }
}

fn analyzer_exe_name() -> String {
    format!("{}{}", ANALYZER_EXE, std::env::consts::EXE_SUFFIX)
}

/// Directory of the running executable, used to resolve the default
/// analyzer and base filter locations.
pub fn install_dir() -> eyre::Result<PathBuf> {
    let exe = std::env::current_exe().wrap_err("failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| eyre::eyre!("executable path has no parent directory"))
}

// ============================================================================
// Tests
// ============================================================================
