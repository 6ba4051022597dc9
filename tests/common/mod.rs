// SPDX-License-Identifier: MPL-2.0
//! In-memory port implementations shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use media_picker::application::picker::{PickerController, PickerServices};
use media_picker::application::port::{
    DirectoryLister, FileOpener, MediaLibrarySource, OpenError, PageSource, PermissionBroker,
    SourceError,
};
use media_picker::domain::media::{Album, AlbumHandle, MediaCategory, MediaItem, MediaKind};
use media_picker::domain::paging::PageSize;
use media_picker::domain::permission::PermissionStatus;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn image(id: &str) -> MediaItem {
    MediaItem::asset(id, "", id, MediaCategory::Image)
}

pub fn video(id: &str) -> MediaItem {
    MediaItem::asset(id, "", id, MediaCategory::Video)
}

pub fn document(id: &str) -> MediaItem {
    MediaItem::asset(id, "", id, MediaCategory::Document("pdf".to_string()))
}

pub fn images(prefix: &str, count: usize) -> Vec<MediaItem> {
    (0..count).map(|i| image(&format!("{prefix}{i}"))).collect()
}

pub fn album(name: &str) -> Album {
    Album::new(name, AlbumHandle::new(name.to_lowercase()))
}

/// Slices `items` the way a paged source does.
fn page_of(items: &[MediaItem], page_index: usize, page_size: PageSize) -> Vec<MediaItem> {
    items
        .iter()
        .skip(page_index * page_size.get())
        .take(page_size.get())
        .cloned()
        .collect()
}

// =============================================================================
// Library
// =============================================================================

#[derive(Default)]
pub struct FakeLibrary {
    albums: Vec<(MediaKind, Album)>,
    items: HashMap<String, Vec<MediaItem>>,
    /// `(album handle, page index)` pairs that fail once.
    failures: Mutex<HashSet<(String, usize)>>,
    pub fetches: AtomicUsize,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_album(mut self, kind: MediaKind, album: Album, items: Vec<MediaItem>) -> Self {
        self.items.insert(album.handle.as_str().to_string(), items);
        self.albums.push((kind, album));
        self
    }

    pub fn fail_once(self, handle: &str, page_index: usize) -> Self {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert((handle.to_string(), page_index));
        }
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaLibrarySource for FakeLibrary {
    async fn list_groupings(&self, kind: MediaKind) -> Result<Vec<Album>, SourceError> {
        Ok(self
            .albums
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, album)| album.clone())
            .collect())
    }

    async fn fetch_page(
        &self,
        album: &Album,
        page_index: usize,
        page_size: PageSize,
    ) -> Result<Vec<MediaItem>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = (album.handle.as_str().to_string(), page_index);
        if self.failures.lock().expect("lock").remove(&key) {
            return Err(SourceError::Unavailable("library offline".to_string()));
        }
        let items = self
            .items
            .get(album.handle.as_str())
            .ok_or_else(|| SourceError::Unavailable("unknown album".to_string()))?;
        Ok(page_of(items, page_index, page_size))
    }
}

// =============================================================================
// Documents
// =============================================================================

#[derive(Default)]
pub struct FakeDocuments {
    items: Vec<MediaItem>,
}

impl FakeDocuments {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl PageSource for FakeDocuments {
    async fn fetch_page(
        &self,
        page_index: usize,
        page_size: PageSize,
    ) -> Result<Vec<MediaItem>, SourceError> {
        Ok(page_of(&self.items, page_index, page_size))
    }

    fn label(&self) -> String {
        "fake documents".to_string()
    }
}

// =============================================================================
// Permission, folders, opener
// =============================================================================

pub struct FakeBroker {
    status: PermissionStatus,
    pub settings_opened: AtomicUsize,
}

impl FakeBroker {
    pub fn new(status: PermissionStatus) -> Self {
        Self {
            status,
            settings_opened: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PermissionBroker for FakeBroker {
    async fn request_access(&self) -> PermissionStatus {
        self.status
    }

    async fn open_system_settings(&self) -> bool {
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
        true
    }
}

#[derive(Default)]
pub struct FakeFolders {
    listings: HashMap<PathBuf, Vec<MediaItem>>,
}

impl FakeFolders {
    pub fn with_listing(mut self, dir: impl Into<PathBuf>, items: Vec<MediaItem>) -> Self {
        self.listings.insert(dir.into(), items);
        self
    }
}

#[async_trait]
impl DirectoryLister for FakeFolders {
    async fn list(&self, dir: &Path) -> Result<Vec<MediaItem>, SourceError> {
        self.listings
            .get(dir)
            .cloned()
            .ok_or_else(|| SourceError::Unreadable {
                path: dir.to_path_buf(),
                reason: "no such directory".to_string(),
            })
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<(PathBuf, Option<String>)>>,
}

#[async_trait]
impl FileOpener for RecordingOpener {
    async fn open(&self, path: &Path, mime_hint: Option<&str>) -> Result<(), OpenError> {
        self.opened
            .lock()
            .expect("lock")
            .push((path.to_path_buf(), mime_hint.map(str::to_string)));
        Ok(())
    }
}

// =============================================================================
// Harness
// =============================================================================

pub struct Harness {
    pub library: Arc<FakeLibrary>,
    pub broker: Arc<FakeBroker>,
    pub opener: Arc<RecordingOpener>,
    pub picker: PickerController,
}

pub struct HarnessBuilder {
    library: FakeLibrary,
    documents: Vec<MediaItem>,
    folders: FakeFolders,
    permission: PermissionStatus,
    page_size: PageSize,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            library: FakeLibrary::new(),
            documents: Vec::new(),
            folders: FakeFolders::default(),
            permission: PermissionStatus::Granted,
            page_size: PageSize::new(30),
        }
    }

    pub fn library(mut self, library: FakeLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn documents(mut self, items: Vec<MediaItem>) -> Self {
        self.documents = items;
        self
    }

    pub fn folders(mut self, folders: FakeFolders) -> Self {
        self.folders = folders;
        self
    }

    pub fn permission(mut self, status: PermissionStatus) -> Self {
        self.permission = status;
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = PageSize::new(size);
        self
    }

    pub fn build(self) -> Harness {
        let library = Arc::new(self.library);
        let broker = Arc::new(FakeBroker::new(self.permission));
        let opener = Arc::new(RecordingOpener::default());
        let services = PickerServices {
            permissions: broker.clone(),
            library: library.clone(),
            documents: Arc::new(FakeDocuments::new(self.documents)),
            directories: Arc::new(self.folders),
            opener: opener.clone(),
        };
        Harness {
            library,
            broker,
            opener,
            picker: PickerController::new(services, self.page_size),
        }
    }
}
