// SPDX-License-Identifier: MPL-2.0
//! One-level folder listing for document navigation.

use super::{is_hidden_name, lowercase_name, read_entries, run_blocking, sort_newest_first};
use super::{stat_candidate, Candidate};
use crate::application::port::{DirectoryLister, SourceError};
use crate::domain::media::{FileKind, MediaCategory, MediaItem};
use async_trait::async_trait;
use std::path::Path;

/// Lists folders (alphabetically) followed by documents (newest first).
///
/// Hidden entries are skipped. Images and videos are left to the library
/// tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryBrowser;

impl DirectoryBrowser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn list_directory(dir: &Path) -> Result<Vec<MediaItem>, SourceError> {
    let entries = read_entries(dir).map_err(|err| SourceError::Unreadable {
        path: dir.to_path_buf(),
        reason: err.to_string(),
    })?;

    let mut folders = Vec::new();
    let mut documents: Vec<Candidate> = Vec::new();
    for (path, is_dir) in entries {
        let Some(name) = lowercase_name(&path) else {
            continue;
        };
        if is_hidden_name(&name) {
            continue;
        }
        if is_dir {
            folders.push((name, MediaItem::directory(path)));
            continue;
        }
        if !FileKind::from_path(&path).is_document() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()).map(str::to_lowercase) else {
            continue;
        };
        match stat_candidate(path, MediaCategory::Document(ext)) {
            Ok(candidate) => documents.push(candidate),
            Err(err) => tracing::warn!(error = %err, "skipping unreadable entry"),
        }
    }

    folders.sort_by(|a, b| a.0.cmp(&b.0));
    sort_newest_first(&mut documents);

    Ok(folders
        .into_iter()
        .map(|(_, item)| item)
        .chain(documents.into_iter().map(|candidate| candidate.item))
        .collect())
}

#[async_trait]
impl DirectoryLister for DirectoryBrowser {
    async fn list(&self, dir: &Path) -> Result<Vec<MediaItem>, SourceError> {
        let dir = dir.to_path_buf();
        run_blocking(move || list_directory(&dir)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::create_file;
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn folders_come_first_then_documents() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b-folder")).expect("mkdir");
        fs::create_dir_all(root.join("A-folder")).expect("mkdir");
        fs::create_dir_all(root.join(".git")).expect("mkdir");
        create_file(root, "old.pdf", 100);
        create_file(root, "new.txt", 1);
        create_file(root, "photo.jpg", 1);

        let items = DirectoryBrowser::new().list(root).await.expect("list");
        let names: Vec<_> = items.iter().map(|i| i.display_name.as_str()).collect();
        assert_eq!(names, vec!["A-folder", "b-folder", "new.txt", "old.pdf"]);
        assert!(items[0].is_container);
        assert!(!items[2].is_container);
    }

    #[tokio::test]
    async fn unreadable_directory_is_reported() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("missing");
        let err = DirectoryBrowser::new()
            .list(&missing)
            .await
            .expect_err("missing dir");
        assert!(matches!(err, SourceError::Unreadable { path, .. } if path == missing));
    }
}
