// SPDX-License-Identifier: MPL-2.0
//! Filesystem-backed adapters.
//!
//! - [`scanner`]: Multi-root document scan (`DocumentScanner`)
//! - [`library`]: Directory tree presented as a media library (`FsMediaLibrary`)
//! - [`browser`]: One-level folder listing (`DirectoryBrowser`)
//! - [`roots`]: Platform document roots
//!
//! All filesystem work runs on tokio's blocking pool.

pub mod browser;
pub mod library;
pub mod roots;
pub mod scanner;

pub use browser::DirectoryBrowser;
pub use library::FsMediaLibrary;
pub use roots::{document_roots, platform_document_roots};
pub use scanner::{scan_documents, DocumentScanner, ScanPolicy};

use crate::application::port::SourceError;
use crate::domain::media::{MediaCategory, MediaItem};
use crate::domain::paging::PageSize;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A listed file with the timestamp used for ordering.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub item: MediaItem,
    pub modified: SystemTime,
}

/// Runs blocking filesystem work off the async executor.
pub(crate) async fn run_blocking<F, T>(work: F) -> Result<T, SourceError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| SourceError::Unavailable(format!("filesystem task failed: {err}")))
}

/// Returns `true` for dotfiles and dot-directories.
pub(crate) fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Lowercase file name of `path`, if it is valid UTF-8.
pub(crate) fn lowercase_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_lowercase)
}

/// Lists `dir`, returning each entry path with whether it is a directory.
///
/// Symlinks are followed when deciding file versus directory.
pub(crate) fn read_entries(dir: &Path) -> std::io::Result<Vec<(PathBuf, bool)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let is_dir = path.is_dir();
        entries.push((path, is_dir));
    }
    Ok(entries)
}

/// Stats `path` and builds its item.
///
/// The item is keyed by the canonical path, so a file reached through a
/// symlinked root gets the same id from every adapter.
///
/// # Errors
///
/// Returns [`SourceError::Unreadable`] if the metadata cannot be read.
pub(crate) fn stat_candidate(path: PathBuf, category: MediaCategory) -> Result<Candidate, SourceError> {
    let path = fs::canonicalize(&path).unwrap_or(path);
    let metadata = fs::metadata(&path).map_err(|err| SourceError::Unreadable {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

    let mut item = MediaItem::file(path, category)
        .with_size(metadata.len())
        .with_modified_at(DateTime::<Utc>::from(modified));
    if let Ok(created) = metadata.created() {
        item = item.with_created_at(DateTime::<Utc>::from(created));
    }
    Ok(Candidate { item, modified })
}

/// Sorts newest first; the path breaks ties so the order is stable across scans.
pub(crate) fn sort_newest_first(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        Reverse(a.modified)
            .cmp(&Reverse(b.modified))
            .then_with(|| a.item.path.cmp(&b.item.path))
    });
}

/// Returns `items[page_index * size .. page_index * size + size]`, clipped.
pub(crate) fn slice_page(
    candidates: Vec<Candidate>,
    page_index: usize,
    page_size: PageSize,
) -> Vec<MediaItem> {
    let size = page_size.get();
    candidates
        .into_iter()
        .skip(page_index.saturating_mul(size))
        .take(size)
        .map(|candidate| candidate.item)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::create_file;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn newest_first_with_path_tie_break() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let old = create_file(temp_dir.path(), "old.pdf", 500);
        let b = create_file(temp_dir.path(), "b.pdf", 10);
        let a = create_file(temp_dir.path(), "a.pdf", 10);

        let category = MediaCategory::Document("pdf".into());
        let mut candidates: Vec<Candidate> = [&old, &b, &a]
            .iter()
            .map(|p| stat_candidate((*p).clone(), category.clone()).expect("stat"))
            .collect();
        // Force identical mtimes for a and b regardless of clock granularity.
        let shared = candidates[1].modified;
        candidates[2].modified = shared;

        sort_newest_first(&mut candidates);
        let order: Vec<_> = candidates.iter().map(|c| c.item.path.clone()).collect();
        assert_eq!(order, vec![a, b, old]);
    }

    #[test]
    fn stat_candidate_reports_missing_files() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("gone.txt");
        let err = stat_candidate(missing.clone(), MediaCategory::Document("txt".into()))
            .expect_err("missing file");
        assert!(matches!(err, SourceError::Unreadable { path, .. } if path == missing));
    }

    #[cfg(unix)]
    #[test]
    fn stat_candidate_keys_items_by_canonical_path() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let real = temp_dir.path().join("real");
        let file = create_file(&real, "memo.txt", 10);
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).expect("failed to create symlink");

        let category = MediaCategory::Document("txt".into());
        let direct = stat_candidate(file, category.clone()).expect("stat direct");
        let via_link = stat_candidate(link.join("memo.txt"), category).expect("stat via link");

        assert_eq!(direct.item.id, via_link.item.id);
        assert_eq!(via_link.item.path, direct.item.path);
    }

    #[test]
    fn slice_page_clips_at_the_end() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let candidates: Vec<Candidate> = (0..5)
            .map(|i| {
                let path = create_file(temp_dir.path(), &format!("{i}.txt"), i);
                stat_candidate(path, MediaCategory::Document("txt".into())).expect("stat")
            })
            .collect();

        assert_eq!(slice_page(candidates.clone(), 0, PageSize::new(2)).len(), 2);
        assert_eq!(slice_page(candidates.clone(), 2, PageSize::new(2)).len(), 1);
        assert!(slice_page(candidates, 3, PageSize::new(2)).is_empty());
    }

    #[test]
    fn hidden_names_start_with_a_dot() {
        assert!(is_hidden_name(".DS_Store"));
        assert!(!is_hidden_name("report.pdf"));
    }
}
