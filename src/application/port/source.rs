// SPDX-License-Identifier: MPL-2.0
//! Page source port definition.
//!
//! This module defines the [`PageSource`] trait: anything that can hand out a
//! category listing one page at a time. The aggregator only ever talks to
//! this trait, whether the pages come from a photo-library album or from the
//! filesystem document scan.

use crate::domain::media::MediaItem;
use crate::domain::paging::PageSize;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// SourceError
// =============================================================================

/// Errors a source can report for a whole request.
///
/// Per-item failures are not reported here: sources skip unreadable items and
/// keep going, so one bad file never fails a page.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    /// The source could not be reached or threw while listing.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The request targeted a single entry that could not be read.
    #[error("Unreadable: {}: {reason}", path.display())]
    Unreadable {
        /// The entry that failed.
        path: PathBuf,
        /// Platform error text.
        reason: String,
    },
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Unavailable(err.to_string())
    }
}

// =============================================================================
// PageSource Trait
// =============================================================================

/// Port for paged listings.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: a fetch runs as a detached future
/// while the controller keeps handling input.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches up to `page_size` items starting at page `page_index`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the listing as a whole failed.
    async fn fetch_page(
        &self,
        page_index: usize,
        page_size: PageSize,
    ) -> Result<Vec<MediaItem>, SourceError>;

    /// Returns `false` for returned items that must not be listed.
    ///
    /// Rejected items still count toward the page size when deciding whether
    /// more pages exist.
    fn admits(&self, _item: &MediaItem) -> bool {
        true
    }

    /// Short label used in log lines.
    fn label(&self) -> String;
}
