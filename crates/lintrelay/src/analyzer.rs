//! Launching the analyzer child process.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tokio::process::Command;

/// Boundary for executing the analyzer, injectable so run coordination
/// stays testable without a real binary on disk.
#[async_trait]
pub trait AnalyzerInvoker: Send + Sync {
    /// Run the analyzer to completion and return its combined
    /// stdout + stderr text. The report only exists once the process has
    /// exited; nothing streams.
    async fn invoke(&self, program: &Path, args: &[OsString]) -> io::Result<String>;
}

/// Spawns the real child process.
#[derive(Debug, Default)]
pub struct ProcessInvoker;

#[async_trait]
impl AnalyzerInvoker for ProcessInvoker {
    async fn invoke(&self, program: &Path, args: &[OsString]) -> io::Result<String> {
        let output = Command::new(program).args(args).output().await?;

        // Exit status is not consulted: a run that found issues exits
        // non-zero and still carries the report.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

/// Arguments for one run: the header-filter scope derived from the
/// target file's directory name, then the target path itself.
pub fn analyzer_args(target: &Path) -> Vec<OsString> {
    let scope = target
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("."));

    let mut header_filter = OsString::from("-header-filter=");
    header_filter.push(scope);

    vec![header_filter, target.as_os_str().to_os_string()]
}

/// `args` joined for the run banner.
pub fn display_args(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_analyzer_args_scope_headers_to_parent_dir_name() {
        let args = analyzer_args(Path::new("/work/project/src/main.cpp"));
        assert_eq!(
            args,
            vec![
                OsString::from("-header-filter=src"),
                OsString::from("/work/project/src/main.cpp"),
            ]
        );
    }

    #[test]
    fn test_analyzer_args_bare_file_falls_back_to_dot() {
        let args = analyzer_args(&PathBuf::from("main.cpp"));
        assert_eq!(args[0], OsString::from("-header-filter=."));
    }

    #[test]
    fn test_display_args_joins_with_spaces() {
        let args = analyzer_args(Path::new("/w/src/a.cpp"));
        assert_eq!(display_args(&args), "-header-filter=src /w/src/a.cpp");
    }
}
