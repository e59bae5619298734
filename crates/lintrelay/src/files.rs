//! File access behind filter discovery.
//!
//! The ancestry walk only ever probes for one file name and reads whole
//! files, so the surface is two methods. [`OsFiles`] is the real
//! filesystem; [`MemoryFiles`] backs tests with a deterministic tree.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only file access for filter discovery.
pub trait Files: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFiles;

impl Files for OsFiles {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory file tree keyed by exact path.
#[derive(Debug, Default, Clone)]
pub struct MemoryFiles {
    files: HashMap<PathBuf, String>,
}

impl MemoryFiles {
    pub fn new() -> MemoryFiles {
        MemoryFiles::default()
    }

    /// Add a file with content (builder style).
    pub fn add(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> MemoryFiles {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl Files for MemoryFiles {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_files() {
        let files = MemoryFiles::new()
            .add("/a/b.txt", "hello")
            .add("/a/c.txt", "world");

        assert!(files.exists(Path::new("/a/b.txt")));
        assert!(!files.exists(Path::new("/a/missing.txt")));
        assert_eq!(files.read_to_string(Path::new("/a/b.txt")).unwrap(), "hello");
        assert!(files.read_to_string(Path::new("/a/missing.txt")).is_err());
    }
}
