// SPDX-License-Identifier: MPL-2.0
//! Album (grouping) types.
//!
//! An album is a named bucket of images or videos exposed by a media library
//! source. The handle is opaque to the picker: only the source that produced it
//! knows how to resolve it back into contents.

use std::fmt;

/// Opaque token a library source uses to address one of its albums.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlbumHandle(String);

impl AlbumHandle {
    /// Wraps a source-specific album token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlbumHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named grouping of media items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Human readable album name.
    pub name: String,
    /// Token used to request the album's contents.
    pub handle: AlbumHandle,
    /// Number of items the source reports for this album, when known.
    pub item_count: Option<usize>,
}

impl Album {
    /// Creates an album without a known item count.
    #[must_use]
    pub fn new(name: impl Into<String>, handle: AlbumHandle) -> Self {
        Self {
            name: name.into(),
            handle,
            item_count: None,
        }
    }

    /// Sets the item count reported by the source.
    #[must_use]
    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = Some(count);
        self
    }

    /// Returns `true` if both albums address the same source bucket.
    #[must_use]
    pub fn same_bucket(&self, other: &Album) -> bool {
        self.handle == other.handle
    }
}
