// SPDX-License-Identifier: MPL-2.0
//! Directory listing port definition.
//!
//! Backs container navigation in the documents tab: tapping a folder lists
//! its children through this port.

use super::source::SourceError;
use crate::domain::media::MediaItem;
use async_trait::async_trait;
use std::path::Path;

/// Port for listing one directory level.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// Lists the browsable children of `dir`: containers first, then leaves.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unreadable`] if `dir` itself cannot be read.
    async fn list(&self, dir: &Path) -> Result<Vec<MediaItem>, SourceError>;
}
