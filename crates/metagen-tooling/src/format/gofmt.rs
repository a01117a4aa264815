//! Formatting through an external `gofmt` binary.
//!
//! The source goes in on stdin and the formatted file comes back on stdout.
//! `gofmt` reads all of its input before writing anything, so writing stdin
//! to completion before collecting output cannot stall on a full pipe.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::SourceFormatter;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Gofmt {
    binary: PathBuf,
}

impl Gofmt {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for Gofmt {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, source: &str) -> Result<String> {
        let binary = self.binary.display();
        debug!(binary = %binary, bytes = source.len(), "Running gofmt");

        let mut child = Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::format(format!("failed to run '{binary}': {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| Error::format(format!("failed to write to '{binary}': {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::format(format!("failed to wait for '{binary}': {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::format(format!(
                "'{binary}' exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::format(format!("'{binary}' produced invalid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binary_is_gofmt_on_path() {
        assert_eq!(Gofmt::default().binary(), Path::new("gofmt"));
    }

    #[test]
    fn test_missing_binary_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let gofmt = Gofmt::new(dir.path().join("no-such-gofmt"));
        let err = gofmt.format("package x\n").unwrap_err();
        assert_eq!(err.kind(), "format");
        assert!(err.to_string().contains("failed to run"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_carries_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-gofmt");
        std::fs::write(
            &script,
            "#!/bin/sh\ncat > /dev/null\necho '<standard input>:3:1: expected declaration' >&2\nexit 2\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = Gofmt::new(&script).format("package x\n}\n").unwrap_err();
        assert_eq!(err.kind(), "format");
        assert!(err.to_string().contains("expected declaration"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_returned() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-gofmt");
        std::fs::write(&script, "#!/bin/sh\ncat\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let out = Gofmt::new(&script).format("package x\n").unwrap();
        assert_eq!(out, "package x\n");
    }
}
