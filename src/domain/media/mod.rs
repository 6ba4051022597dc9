// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains the item, album and file-kind types shared by every
//! layer of the picker. They carry no I/O.

pub mod album;
pub mod file_kind;
pub mod types;

// Re-export commonly used types
pub use album::{Album, AlbumHandle};
pub use file_kind::{extensions, mime_type_for_extension, AccentColor, FileKind};
pub use types::{Category, ItemId, MediaCategory, MediaItem, MediaKind};
