// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Paging**: Items requested per page
//! - **Document scan**: Holder allow-list, descent depth and exclusion lists

use crate::domain::paging::page_size_bounds;

// ==========================================================================
// Paging Defaults
// ==========================================================================

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: usize = page_size_bounds::DEFAULT;

/// Minimum page size.
pub const MIN_PAGE_SIZE: usize = page_size_bounds::MIN;

/// Maximum page size.
pub const MAX_PAGE_SIZE: usize = page_size_bounds::MAX;

// ==========================================================================
// Document Scan Defaults
// ==========================================================================

/// Subdirectory names that likely hold documents (compared case-insensitively).
/// These get one extra level of descent during the scan.
pub const DEFAULT_DOCUMENT_HOLDER_NAMES: &[&str] = &[
    "downloads",
    "documents",
    "docs",
    "files",
    "media",
    "pdf",
    "ebooks",
    "books",
    "document",
];

/// Extra levels scanned below a holder directory.
pub const DEFAULT_HOLDER_DESCENT_DEPTH: usize = 1;

/// Maximum extra levels below a holder directory.
pub const MAX_HOLDER_DESCENT_DEPTH: usize = 3;

/// Directory names that mark system or app-internal content
/// (compared case-insensitively, only below a scan root).
pub const SYSTEM_DIRECTORY_NAMES: &[&str] = &[
    "android",
    "cache",
    "caches",
    ".cache",
    "lost.dir",
    "lost+found",
    "node_modules",
    ".git",
    ".svn",
    ".thumbnails",
    "thumbnails",
    ".trash",
    ".trashes",
    "$recycle.bin",
    "system volume information",
    "tmp",
    "temp",
];

/// File names written by operating systems next to user files.
pub const OS_METADATA_FILE_NAMES: &[&str] = &[
    "desktop.ini",
    "thumbs.db",
    "ehthumbs.db",
    "icon\r",
    ".ds_store",
    ".localized",
    ".nomedia",
];

/// Extensions of logs, caches, binaries and databases. Never listed as
/// documents even where a loose classification might admit them.
pub const SYSTEM_FILE_EXTENSIONS: &[&str] = &[
    "log", "tmp", "temp", "bak", "cache", "lock", "pid", "swp", "dat", "db", "sqlite", "sqlite3",
    "journal", "exe", "dll", "so", "dylib", "bin", "sys", "apk", "dex", "odex", "obb", "class",
];
