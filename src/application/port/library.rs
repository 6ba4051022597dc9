// SPDX-License-Identifier: MPL-2.0
//! Media library port definition.
//!
//! This module defines the [`MediaLibrarySource`] trait, the contract the
//! picker consumes from the platform photo-library plugin, and
//! [`AlbumPageSource`], which pins a library to one album so it can feed the
//! generic paginated aggregator.

use super::source::{PageSource, SourceError};
use crate::domain::media::{Album, MediaItem, MediaKind};
use crate::domain::paging::PageSize;
use async_trait::async_trait;
use std::sync::Arc;

/// Port for the platform media library.
///
/// # Example
///
/// ```ignore
/// use media_picker::application::port::MediaLibrarySource;
/// use media_picker::domain::media::MediaKind;
///
/// async fn first_album_names(library: &dyn MediaLibrarySource) -> Vec<String> {
///     match library.list_groupings(MediaKind::Image).await {
///         Ok(albums) => albums.into_iter().map(|a| a.name).collect(),
///         Err(_) => Vec::new(),
///     }
/// }
/// ```
#[async_trait]
pub trait MediaLibrarySource: Send + Sync {
    /// Lists the albums holding items of `kind`.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the library cannot be queried.
    async fn list_groupings(&self, kind: MediaKind) -> Result<Vec<Album>, SourceError>;

    /// Fetches one page of an album, in the library's native order.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the page cannot be listed.
    async fn fetch_page(
        &self,
        album: &Album,
        page_index: usize,
        page_size: PageSize,
    ) -> Result<Vec<MediaItem>, SourceError>;
}

/// A library pinned to one album and one kind.
///
/// Items of another kind returned by the library (an "all media" album, for
/// instance) are not admitted, so the image and video tabs stay disjoint.
/// They are still counted as returned, so a mixed page does not end the
/// listing early.
pub struct AlbumPageSource {
    library: Arc<dyn MediaLibrarySource>,
    album: Album,
    kind: MediaKind,
}

impl AlbumPageSource {
    #[must_use]
    pub fn new(library: Arc<dyn MediaLibrarySource>, album: Album, kind: MediaKind) -> Self {
        Self {
            library,
            album,
            kind,
        }
    }

    #[must_use]
    pub fn album(&self) -> &Album {
        &self.album
    }
}

impl std::fmt::Debug for AlbumPageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlbumPageSource")
            .field("album", &self.album)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PageSource for AlbumPageSource {
    async fn fetch_page(
        &self,
        page_index: usize,
        page_size: PageSize,
    ) -> Result<Vec<MediaItem>, SourceError> {
        self.library
            .fetch_page(&self.album, page_index, page_size)
            .await
    }

    fn admits(&self, item: &MediaItem) -> bool {
        self.kind.admits(&item.category)
    }

    fn label(&self) -> String {
        format!("album '{}'", self.album.name)
    }
}
