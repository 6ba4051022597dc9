// SPDX-License-Identifier: MPL-2.0
//! Document scan across several root directories.
//!
//! There is no central index for arbitrary documents, so the scanner walks a
//! bounded neighbourhood of each root with [`walkdir`]:
//!
//! - files directly in the root;
//! - files one level down in every subdirectory;
//! - for "holder" subdirectories (`Downloads`, `Documents`, ...), files up to
//!   [`ScanPolicy::holder_depth`] levels further down.
//!
//! Hidden entries, OS metadata files, system extensions and system directory
//! names below a root are excluded. Files reachable through two roots are
//! listed once. The result is ordered newest first and paginated as an
//! in-memory slice. Every page request re-runs the whole scan, so a page
//! always slices the current state of the filesystem.

use super::{
    is_hidden_name, lowercase_name, run_blocking, slice_page, sort_newest_first, stat_candidate,
    Candidate,
};
use crate::application::port::{PageSource, SourceError};
use crate::config::{
    DocumentsConfig, DEFAULT_DOCUMENT_HOLDER_NAMES, DEFAULT_HOLDER_DESCENT_DEPTH,
    OS_METADATA_FILE_NAMES, SYSTEM_DIRECTORY_NAMES, SYSTEM_FILE_EXTENSIONS,
};
use crate::domain::media::{FileKind, MediaCategory, MediaItem};
use crate::domain::paging::PageSize;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::{DirEntry, WalkDir};

// =============================================================================
// ScanPolicy
// =============================================================================

/// Where and how deep the document scan looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPolicy {
    roots: Vec<PathBuf>,
    holder_names: Vec<String>,
    holder_depth: usize,
}

impl ScanPolicy {
    /// Creates a policy over `roots` with the default holder list and depth.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            holder_names: DEFAULT_DOCUMENT_HOLDER_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            holder_depth: DEFAULT_HOLDER_DESCENT_DEPTH,
        }
    }

    /// Builds a policy from the `[documents]` config section and resolved roots.
    #[must_use]
    pub fn from_config(config: &DocumentsConfig, roots: Vec<PathBuf>) -> Self {
        Self::new(roots)
            .with_holder_names(config.holder_names.iter().cloned())
            .with_holder_depth(config.holder_depth())
    }

    #[must_use]
    pub fn with_holder_names(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.holder_names = names.into_iter().map(|name| name.to_lowercase()).collect();
        self
    }

    #[must_use]
    pub fn with_holder_depth(mut self, depth: usize) -> Self {
        self.holder_depth = depth;
        self
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Extra levels scanned below a holder directory.
    #[must_use]
    pub fn holder_depth(&self) -> usize {
        self.holder_depth
    }

    fn is_holder(&self, lowercase_name: &str) -> bool {
        self.holder_names.iter().any(|name| name == lowercase_name)
    }

    /// Walk filter: the root and files always pass; below the first level a
    /// directory is entered only inside a holder subdirectory.
    fn descends_into(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        let Some(name) = lowercase_name(entry.path()) else {
            return false;
        };
        if is_excluded_dir(&name) {
            return false;
        }
        if entry.depth() == 1 {
            return true;
        }
        entry
            .path()
            .strip_prefix(root)
            .ok()
            .and_then(|relative| relative.components().next())
            .and_then(|first| first.as_os_str().to_str())
            .is_some_and(|first| self.is_holder(&first.to_lowercase()))
    }
}

// =============================================================================
// Scan
// =============================================================================

/// Runs a full scan and returns every document, newest first.
///
/// Missing or unreadable roots are skipped; unreadable files are skipped.
#[must_use]
pub fn scan_documents(policy: &ScanPolicy) -> Vec<MediaItem> {
    collect_candidates(policy)
        .into_iter()
        .map(|candidate| candidate.item)
        .collect()
}

fn collect_candidates(policy: &ScanPolicy) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut skipped = 0;

    for root in &policy.roots {
        let walker = WalkDir::new(root)
            .follow_links(true)
            .max_depth(2 + policy.holder_depth)
            .into_iter()
            .filter_entry(|entry| policy.descends_into(root, entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    tracing::debug!(root = %root.display(), error = %err, "skipping root");
                    continue;
                }
                Err(err) => {
                    tracing::debug!(error = %err, "skipping directory");
                    skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(category) = document_category(entry.path()) else {
                continue;
            };
            match stat_candidate(entry.into_path(), category) {
                Ok(candidate) => {
                    if seen.insert(candidate.item.path.clone()) {
                        found.push(candidate);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable document");
                    skipped += 1;
                }
            }
        }
    }
    tracing::debug!(
        roots = policy.roots.len(),
        documents = found.len(),
        skipped,
        "document scan finished"
    );

    sort_newest_first(&mut found);
    found
}

fn is_excluded_dir(lowercase_name: &str) -> bool {
    is_hidden_name(lowercase_name) || SYSTEM_DIRECTORY_NAMES.contains(&lowercase_name)
}

/// Classifies a file as a document, or `None` if it must not be listed.
fn document_category(path: &Path) -> Option<MediaCategory> {
    let name = lowercase_name(path)?;
    if is_hidden_name(&name) || OS_METADATA_FILE_NAMES.contains(&name.as_str()) {
        return None;
    }
    let ext = path.extension()?.to_str()?.to_lowercase();
    if SYSTEM_FILE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    FileKind::from_extension(&ext)
        .is_document()
        .then_some(MediaCategory::Document(ext))
}

// =============================================================================
// DocumentScanner
// =============================================================================

/// [`PageSource`] over the document scan.
#[derive(Debug, Clone)]
pub struct DocumentScanner {
    policy: Arc<ScanPolicy>,
}

impl DocumentScanner {
    #[must_use]
    pub fn new(policy: ScanPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &ScanPolicy {
        &self.policy
    }
}

#[async_trait]
impl PageSource for DocumentScanner {
    async fn fetch_page(
        &self,
        page_index: usize,
        page_size: PageSize,
    ) -> Result<Vec<MediaItem>, SourceError> {
        let policy = Arc::clone(&self.policy);
        run_blocking(move || slice_page(collect_candidates(&policy), page_index, page_size)).await
    }

    fn label(&self) -> String {
        format!("document scan ({} roots)", self.policy.roots.len())
    }
}
