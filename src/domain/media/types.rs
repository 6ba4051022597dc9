// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use super::file_kind::{mime_type_for_extension, FileKind};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identifier of a selectable unit.
///
/// Library assets use the platform asset id; filesystem entries use their
/// absolute path. Two items with the same id are the same logical entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the id of a filesystem entry from its path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Primary partition of the browsing UI. One tab per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Image,
    Video,
    Document,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Category; 3] = [Category::Image, Category::Video, Category::Document];

    /// Returns the library kind used to list albums for this category.
    ///
    /// Documents are not backed by the library and return `None`.
    #[must_use]
    pub fn library_kind(self) -> Option<MediaKind> {
        match self {
            Category::Image => Some(MediaKind::Image),
            Category::Video => Some(MediaKind::Video),
            Category::Document => None,
        }
    }

    /// Parses a user-facing category name (`images`, `video`, `docs`, ...).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "image" | "images" | "photo" | "photos" => Some(Category::Image),
            "video" | "videos" => Some(Category::Video),
            "document" | "documents" | "doc" | "docs" | "files" => Some(Category::Document),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Image => "images",
            Category::Video => "videos",
            Category::Document => "documents",
        };
        f.write_str(label)
    }
}

/// Kind filter accepted by a library source when listing albums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    Image,
    Video,
    #[default]
    Any,
}

impl MediaKind {
    /// Returns `true` if an item of `category` belongs to this kind.
    #[must_use]
    pub fn admits(self, category: &MediaCategory) -> bool {
        match self {
            MediaKind::Image => matches!(category, MediaCategory::Image),
            MediaKind::Video => matches!(category, MediaCategory::Video),
            MediaKind::Any => !matches!(category, MediaCategory::Document(_)),
        }
    }
}

/// Category tag carried by each item.
///
/// Documents keep their lowercase extension so that icon and MIME lookups can
/// be resolved through [`FileKind`] without touching the path again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    Image,
    Video,
    Document(String),
}

impl MediaCategory {
    /// Returns the tab this item is listed under.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            MediaCategory::Image => Category::Image,
            MediaCategory::Video => Category::Video,
            MediaCategory::Document(_) => Category::Document,
        }
    }

    /// Classifies a path. Unrecognized extensions yield `None`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match FileKind::from_path(path) {
            FileKind::Image => Some(MediaCategory::Image),
            FileKind::Video => Some(MediaCategory::Video),
            kind if kind.is_document() => {
                let ext = path.extension()?.to_str()?.to_lowercase();
                Some(MediaCategory::Document(ext))
            }
            _ => None,
        }
    }
}

/// One selectable unit: a library asset, a file or a directory.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: ItemId,
    /// Resolved local path. Empty when the source could not resolve one.
    pub path: PathBuf,
    pub display_name: String,
    pub category: MediaCategory,
    /// `true` for a browsable directory, which is never part of a result.
    pub is_container: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub size_bytes: Option<u64>,
    pub mime_type: Option<String>,
}

impl MediaItem {
    /// Creates a library asset item.
    #[must_use]
    pub fn asset(
        id: impl Into<ItemId>,
        path: impl Into<PathBuf>,
        display_name: impl Into<String>,
        category: MediaCategory,
    ) -> Self {
        let path = path.into();
        let mime_type = mime_for(&path);
        Self {
            id: id.into(),
            path,
            display_name: display_name.into(),
            category,
            is_container: false,
            created_at: None,
            modified_at: None,
            size_bytes: None,
            mime_type,
        }
    }

    /// Creates a leaf item for a file, identified by its path.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>, category: MediaCategory) -> Self {
        let path = path.into();
        let display_name = file_name(&path);
        Self::asset(ItemId::from_path(&path), path, display_name, category)
    }

    /// Creates a container item for a directory, identified by its path.
    #[must_use]
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: ItemId::from_path(&path),
            display_name: file_name(&path),
            path,
            category: MediaCategory::Document(String::new()),
            is_container: true,
            created_at: None,
            modified_at: None,
            size_bytes: None,
            mime_type: None,
        }
    }

    #[must_use]
    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = Some(modified_at);
        self
    }

    /// Returns `true` if the item may appear in a confirmed result.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_container
    }

    /// Returns `true` if the item has a resolved local path.
    #[must_use]
    pub fn has_local_path(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    /// Returns the kind used for icon, color and MIME dispatch.
    #[must_use]
    pub fn file_kind(&self) -> FileKind {
        if self.is_container {
            return FileKind::Folder;
        }
        match &self.category {
            MediaCategory::Image => FileKind::Image,
            MediaCategory::Video => FileKind::Video,
            MediaCategory::Document(ext) => FileKind::from_extension(ext),
        }
    }

    /// Returns the most recent timestamp known for the item.
    #[must_use]
    pub fn sort_time(&self) -> Option<DateTime<Utc>> {
        self.modified_at.or(self.created_at)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn mime_for(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(mime_type_for_extension)
        .map(str::to_string)
}
