// SPDX-License-Identifier: MPL-2.0
//! File opener port definition.
//!
//! Used only when a document is activated outside the picker's own preview.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by a [`FileOpener`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OpenError {
    /// The file no longer exists.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No application could open the file, or the launch failed.
    #[error("Failed to open {}: {reason}", path.display())]
    Failed {
        /// The file that was being opened.
        path: PathBuf,
        /// Reason reported by the platform.
        reason: String,
    },
}

/// Port for handing a file to the platform's default application.
#[async_trait]
pub trait FileOpener: Send + Sync {
    /// Opens `path`, passing `mime_hint` to platforms that dispatch on type.
    ///
    /// # Errors
    ///
    /// Returns an [`OpenError`] with the platform's reason on failure.
    async fn open(&self, path: &Path, mime_hint: Option<&str>) -> Result<(), OpenError>;
}
