// SPDX-License-Identifier: MPL-2.0
//! Directory tree presented as a media library.
//!
//! The root itself is the "All" album (its files plus those of its immediate
//! subdirectories); each non-hidden immediate subdirectory holding media of
//! the requested kind is an album of its own. Album handles encode the kind
//! so that a page is already filtered before it is sliced.

use super::{
    is_hidden_name, lowercase_name, read_entries, run_blocking, slice_page, sort_newest_first,
    stat_candidate, Candidate,
};
use crate::application::port::{MediaLibrarySource, SourceError};
use crate::domain::media::{Album, AlbumHandle, MediaCategory, MediaItem, MediaKind};
use crate::domain::paging::PageSize;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Display name of the root album.
pub const ALL_ALBUM_NAME: &str = "All";

/// Media library over a local directory.
#[derive(Debug, Clone)]
pub struct FsMediaLibrary {
    root: Arc<PathBuf>,
}

impl FsMediaLibrary {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn kind_tag(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
        MediaKind::Any => "any",
    }
}

fn parse_kind_tag(tag: &str) -> Option<MediaKind> {
    match tag {
        "image" => Some(MediaKind::Image),
        "video" => Some(MediaKind::Video),
        "any" => Some(MediaKind::Any),
        _ => None,
    }
}

/// Handle format: `<kind>:<subdirectory>`; an empty subdirectory is the root.
fn encode_handle(kind: MediaKind, subdir: &str) -> AlbumHandle {
    AlbumHandle::new(format!("{}:{subdir}", kind_tag(kind)))
}

fn decode_handle(handle: &AlbumHandle) -> Result<(MediaKind, &str), SourceError> {
    handle
        .as_str()
        .split_once(':')
        .and_then(|(tag, subdir)| parse_kind_tag(tag).map(|kind| (kind, subdir)))
        .ok_or_else(|| SourceError::Unavailable(format!("unknown album handle '{handle}'")))
}

/// Media files directly inside `dir`, matching `kind`.
fn media_in(dir: &Path, kind: MediaKind) -> Vec<Candidate> {
    let entries = match read_entries(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "cannot list album directory");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter(|(path, is_dir)| {
            !is_dir && lowercase_name(path).is_some_and(|name| !is_hidden_name(&name))
        })
        .filter_map(|(path, _)| {
            let category = MediaCategory::from_path(&path).filter(|c| kind.admits(c))?;
            match stat_candidate(path, category) {
                Ok(candidate) => Some(candidate),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable media file");
                    None
                }
            }
        })
        .collect()
}

/// Non-hidden immediate subdirectories of `root`, sorted by name.
fn subdirectories(root: &Path) -> Vec<(String, PathBuf)> {
    let mut dirs: Vec<(String, PathBuf)> = read_entries(root)
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, is_dir)| *is_dir)
        .filter_map(|(path, _)| {
            let name = path.file_name()?.to_str()?.to_string();
            (!is_hidden_name(&name)).then_some((name, path))
        })
        .collect();
    dirs.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    dirs
}

fn list_albums(root: &Path, kind: MediaKind) -> Result<Vec<Album>, SourceError> {
    if !root.is_dir() {
        return Err(SourceError::Unavailable(format!(
            "library root {} is not a directory",
            root.display()
        )));
    }

    let mut total = media_in(root, kind).len();
    let mut albums = Vec::new();
    for (name, path) in subdirectories(root) {
        let count = media_in(&path, kind).len();
        if count == 0 {
            continue;
        }
        total += count;
        albums.push(Album::new(name.clone(), encode_handle(kind, &name)).with_item_count(count));
    }

    let all = Album::new(ALL_ALBUM_NAME, encode_handle(kind, "")).with_item_count(total);
    albums.insert(0, all);
    Ok(albums)
}

fn album_candidates(root: &Path, album: &Album) -> Result<Vec<Candidate>, SourceError> {
    let (kind, subdir) = decode_handle(&album.handle)?;
    let mut candidates = if subdir.is_empty() {
        let mut all = media_in(root, kind);
        for (_, path) in subdirectories(root) {
            all.extend(media_in(&path, kind));
        }
        all
    } else {
        let dir = root.join(subdir);
        if !dir.is_dir() {
            return Err(SourceError::Unavailable(format!(
                "album '{}' no longer exists",
                album.name
            )));
        }
        media_in(&dir, kind)
    };
    sort_newest_first(&mut candidates);
    Ok(candidates)
}

#[async_trait]
impl MediaLibrarySource for FsMediaLibrary {
    async fn list_groupings(&self, kind: MediaKind) -> Result<Vec<Album>, SourceError> {
        let root = Arc::clone(&self.root);
        run_blocking(move || list_albums(&root, kind)).await?
    }

    async fn fetch_page(
        &self,
        album: &Album,
        page_index: usize,
        page_size: PageSize,
    ) -> Result<Vec<MediaItem>, SourceError> {
        let root = Arc::clone(&self.root);
        let album = album.clone();
        run_blocking(move || {
            album_candidates(&root, &album)
                .map(|candidates| slice_page(candidates, page_index, page_size))
        })
        .await?
    }
}
