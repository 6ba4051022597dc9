// SPDX-License-Identifier: MPL-2.0
//! Opens files with the platform's default application.

use crate::application::port::{FileOpener, OpenError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Launches the platform opener command (`xdg-open`, `open`, `cmd /C start`).
#[derive(Debug, Clone)]
pub struct SystemFileOpener {
    program: String,
    args: Vec<String>,
}

impl Default for SystemFileOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemFileOpener {
    /// Uses the opener command of the current platform.
    #[must_use]
    pub fn new() -> Self {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("open", &[])
        } else if cfg!(target_os = "windows") {
            ("cmd", &["/C", "start", ""])
        } else {
            ("xdg-open", &[])
        };
        Self::with_command(program, args.iter().map(|a| (*a).to_string()).collect())
    }

    /// Uses `program args... <path>` instead of the platform default.
    #[must_use]
    pub fn with_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

fn launch(program: &str, args: &[String], path: &Path) -> Result<(), OpenError> {
    let failed = |reason: String| OpenError::Failed {
        path: path.to_path_buf(),
        reason,
    };
    let status = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|err| failed(format!("cannot run {program}: {err}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(failed(format!("{program} exited with {status}")))
    }
}

#[async_trait]
impl FileOpener for SystemFileOpener {
    async fn open(&self, path: &Path, mime_hint: Option<&str>) -> Result<(), OpenError> {
        if !path.exists() {
            return Err(OpenError::NotFound(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), mime = ?mime_hint, "opening externally");

        let program = self.program.clone();
        let args = self.args.clone();
        let target: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || launch(&program, &args, &target))
            .await
            .map_err(|err| OpenError::Failed {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("gone.pdf");
        let err = SystemFileOpener::new()
            .open(&missing, Some("application/pdf"))
            .await
            .expect_err("missing file");
        assert_eq!(err, OpenError::NotFound(missing));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_exit_status_is_reported() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, b"hello").expect("write file");

        let ok = SystemFileOpener::with_command("true", Vec::new());
        assert!(ok.open(&file, None).await.is_ok());

        let failing = SystemFileOpener::with_command("false", Vec::new());
        let err = failing.open(&file, None).await.expect_err("false fails");
        assert!(matches!(err, OpenError::Failed { .. }));
    }

    #[tokio::test]
    async fn unknown_program_is_a_failure() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, b"hello").expect("write file");

        let opener = SystemFileOpener::with_command("media-picker-no-such-opener", Vec::new());
        let err = opener.open(&file, None).await.expect_err("spawn fails");
        assert!(matches!(err, OpenError::Failed { reason, .. } if reason.contains("cannot run")));
    }
}
