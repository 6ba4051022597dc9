// SPDX-License-Identifier: MPL-2.0
//! Document scan roots.

use crate::config::paths::APP_NAME;
use crate::config::DocumentsConfig;
use std::collections::HashSet;
use std::path::PathBuf;

/// Well-known user directories plus this app's private data and cache dirs.
///
/// Order matters only for logging; the scan de-duplicates files anyway.
#[must_use]
pub fn platform_document_roots() -> Vec<PathBuf> {
    let user_dirs = [
        dirs::download_dir(),
        dirs::document_dir(),
        dirs::desktop_dir(),
        dirs::home_dir(),
    ];
    let app_dirs = [dirs::data_local_dir(), dirs::cache_dir()]
        .into_iter()
        .map(|dir| dir.map(|d| d.join(APP_NAME)));

    user_dirs.into_iter().chain(app_dirs).flatten().collect()
}

/// Resolves the roots to scan: platform roots (if enabled) then the extra
/// roots, keeping only existing directories, without duplicates.
#[must_use]
pub fn document_roots(config: &DocumentsConfig) -> Vec<PathBuf> {
    let platform = if config.include_platform_roots {
        platform_document_roots()
    } else {
        Vec::new()
    };

    let mut seen = HashSet::new();
    let roots: Vec<PathBuf> = platform
        .into_iter()
        .chain(config.extra_roots.iter().cloned())
        .filter(|root| root.is_dir())
        .filter(|root| seen.insert(root.canonicalize().unwrap_or_else(|_| root.clone())))
        .collect();
    tracing::debug!(count = roots.len(), "document roots resolved");
    roots
}
