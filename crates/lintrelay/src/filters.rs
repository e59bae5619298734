//! Layered filter discovery.
//!
//! The chain starts from a base set shipped next to the binary and grows
//! with one `.lintrelay-filters` file per ancestor directory of the
//! analyzed file. Ancestors apply root-most first, so the file nearest
//! the analyzed source appends last and its substitutions run last: a
//! project can blank out analyzer noise globally while a subdirectory
//! reshapes what is left.
//!
//! Discovery never fails a run. Unreadable files, malformed documents
//! and broken patterns are skipped rule by rule; each skip is recorded
//! so the run can surface it.

use crate::files::Files;
use lintrelay_core::{CompiledFilter, FilterFile};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// One applicable rule plus where it came from.
#[derive(Debug, Clone)]
pub struct ChainEntry {
    pub filter: CompiledFilter,
    /// The filter file that contributed this rule.
    pub origin: PathBuf,
}

/// The merged chain for one analyzed file.
#[derive(Debug, Default)]
pub struct FilterChain {
    pub entries: Vec<ChainEntry>,
    /// Problems encountered while loading, one message per skipped
    /// document or rule, each naming the offending file.
    pub errors: Vec<String>,
}

impl FilterChain {
    /// The compiled rules, in application order.
    pub fn filters(&self) -> Vec<CompiledFilter> {
        self.entries.iter().map(|entry| entry.filter.clone()).collect()
    }
}

/// Loads and layers filter files.
pub struct FilterStore {
    files: Arc<dyn Files>,
    file_name: String,
    base: Vec<ChainEntry>,
    base_errors: Vec<String>,
}

impl FilterStore {
    /// Load the base set once. A missing base file is an empty base, not
    /// an error.
    pub fn new(
        files: Arc<dyn Files>,
        base_path: &Path,
        file_name: impl Into<String>,
    ) -> FilterStore {
        let mut base = Vec::new();
        let mut base_errors = Vec::new();
        if files.exists(base_path) {
            load_filter_file(files.as_ref(), base_path, &mut base, &mut base_errors);
        } else {
            debug!("no base filter file at {}", base_path.display());
        }

        FilterStore {
            files,
            file_name: file_name.into(),
            base,
            base_errors,
        }
    }

    /// The chain that applies to `analyzed_file`: base rules first, then
    /// one file per ancestor directory, root-most first, nearest last.
    pub fn filters_for(&self, analyzed_file: &Path) -> FilterChain {
        let mut chain = FilterChain {
            entries: self.base.clone(),
            errors: self.base_errors.clone(),
        };

        for dir in ancestry_root_first(analyzed_file) {
            let candidate = dir.join(&self.file_name);
            if !self.files.exists(&candidate) {
                continue;
            }
            load_filter_file(
                self.files.as_ref(),
                &candidate,
                &mut chain.entries,
                &mut chain.errors,
            );
        }

        debug!(
            "filter chain for {}: {} rules",
            analyzed_file.display(),
            chain.entries.len()
        );
        chain
    }
}

/// Ancestor directories of `file`, ordered from the filesystem root down
/// to the file's own directory.
fn ancestry_root_first(file: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = file.ancestors().skip(1).map(Path::to_path_buf).collect();
    dirs.reverse();
    dirs
}

fn load_filter_file(
    files: &dyn Files,
    path: &Path,
    into: &mut Vec<ChainEntry>,
    errors: &mut Vec<String>,
) {
    let content = match files.read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            let message = format!("failed to read filter file {}: {}", path.display(), err);
            warn!("{}", message);
            errors.push(message);
            return;
        }
    };

    let document = match FilterFile::parse(&content) {
        Ok(document) => document,
        Err(err) => {
            let message = format!("skipping filter file {}: {}", path.display(), err);
            warn!("{}", message);
            errors.push(message);
            return;
        }
    };

    for rule in &document.filters {
        match CompiledFilter::compile(rule) {
            Ok(filter) => into.push(ChainEntry {
                filter,
                origin: path.to_path_buf(),
            }),
            Err(err) => {
                let message = format!("skipping rule in {}: {}", path.display(), err);
                warn!("{}", message);
                errors.push(message);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
