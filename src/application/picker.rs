// SPDX-License-Identifier: MPL-2.0
//! Picker screen controller.
//!
//! [`PickerController`] coordinates the three category feeds, the shared
//! selection, library permission and folder navigation. It owns no platform
//! code: every capability arrives through the ports bundled in
//! [`PickerServices`].
//!
//! # Concurrency
//!
//! Fetches are started with [`PickerController::begin_fetch`], run detached and
//! handed back through [`PickerController::complete_fetch`]. Different
//! categories can be in flight at the same time; completions for a reset feed
//! or a closed screen are dropped. The selection is only ever touched by the
//! input handlers (`tap`, `long_press`, `toggle`, `clear_selection`,
//! `confirm`, `cancel`) and by album or refresh resets.

use crate::application::port::{
    AlbumPageSource, DirectoryLister, FileOpener, MediaLibrarySource, PageSource, PermissionBroker,
};
use crate::application::query::{CategoryFeed, FeedStatus, FetchApplied, FetchOutcome, FetchRequest};
use crate::domain::media::{Album, Category, ItemId, MediaCategory, MediaItem};
use crate::domain::paging::PageSize;
use crate::domain::permission::PermissionStatus;
use crate::domain::selection::{SelectionSet, TapAction};
use crate::error::{Error, Result};
use futures_util::future::join_all;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// External collaborators injected into the controller.
#[derive(Clone)]
pub struct PickerServices {
    pub permissions: Arc<dyn PermissionBroker>,
    pub library: Arc<dyn MediaLibrarySource>,
    pub documents: Arc<dyn PageSource>,
    pub directories: Arc<dyn DirectoryLister>,
    pub opener: Arc<dyn FileOpener>,
}

/// One level of folder navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseLevel {
    pub directory: PathBuf,
    pub items: Vec<MediaItem>,
}

/// State of one picker screen, from entry to confirm or cancel.
pub struct PickerController {
    services: PickerServices,
    images: CategoryFeed,
    videos: CategoryFeed,
    documents: CategoryFeed,
    selection: SelectionSet,
    permission: Option<PermissionStatus>,
    active_tab: Category,
    browse_stack: Vec<BrowseLevel>,
    /// Every item listed while browsing folders, kept after leaving a level so
    /// selections made there survive navigation.
    browsed: Vec<MediaItem>,
    browsed_stamps: HashMap<ItemId, u64>,
    page_size: PageSize,
    next_stamp: u64,
    open: bool,
    pending_error: Option<Error>,
}

impl PickerController {
    #[must_use]
    pub fn new(services: PickerServices, page_size: PageSize) -> Self {
        let mut documents = CategoryFeed::new(Category::Document);
        documents.set_source(Arc::clone(&services.documents), None);
        Self {
            services,
            images: CategoryFeed::new(Category::Image),
            videos: CategoryFeed::new(Category::Video),
            documents,
            selection: SelectionSet::new(),
            permission: None,
            active_tab: Category::Image,
            browse_stack: Vec::new(),
            browsed: Vec::new(),
            browsed_stamps: HashMap::new(),
            page_size,
            next_stamp: 0,
            open: true,
            pending_error: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn permission(&self) -> Option<PermissionStatus> {
        self.permission
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn active_tab(&self) -> Category {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, category: Category) {
        self.active_tab = category;
    }

    #[must_use]
    pub fn feed(&self, category: Category) -> &CategoryFeed {
        match category {
            Category::Image => &self.images,
            Category::Video => &self.videos,
            Category::Document => &self.documents,
        }
    }

    fn feed_mut(&mut self, category: Category) -> &mut CategoryFeed {
        match category {
            Category::Image => &mut self.images,
            Category::Video => &mut self.videos,
            Category::Document => &mut self.documents,
        }
    }

    fn feeds(&self) -> [&CategoryFeed; 3] {
        [&self.images, &self.videos, &self.documents]
    }

    /// Items listed so far in a category, in load order.
    #[must_use]
    pub fn items(&self, category: Category) -> &[MediaItem] {
        self.feed(category).items()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selection.contains(id)
    }

    /// Display state of a category tab.
    #[must_use]
    pub fn status(&self, category: Category) -> FeedStatus {
        if !self.access_granted() {
            return FeedStatus::NeedsPermission;
        }
        self.feed(category).status()
    }

    /// Returns the pending error once, clearing it.
    pub fn take_error(&mut self) -> Option<Error> {
        self.pending_error.take()
    }

    fn access_granted(&self) -> bool {
        self.permission.is_some_and(PermissionStatus::allows_fetch)
    }

    fn require_access(&mut self) -> Result<()> {
        match self.permission {
            Some(status) if status.allows_fetch() => Ok(()),
            status => {
                let err = Error::PermissionDenied(status.unwrap_or(PermissionStatus::Denied));
                self.pending_error = Some(err.clone());
                Err(err)
            }
        }
    }

    // =========================================================================
    // Permission
    // =========================================================================

    /// Asks the broker for library access and records the answer.
    ///
    /// Anything short of [`PermissionStatus::Granted`] leaves every tab in
    /// [`FeedStatus::NeedsPermission`] and queues a `PermissionDenied` error.
    pub async fn request_permission(&mut self) -> PermissionStatus {
        let status = self.services.permissions.request_access().await;
        tracing::info!(%status, "library permission");
        self.permission = Some(status);
        if !status.allows_fetch() {
            self.pending_error = Some(Error::PermissionDenied(status));
        }
        status
    }

    /// Opens the platform settings so the user can grant access.
    pub async fn open_settings(&self) -> bool {
        self.services.permissions.open_system_settings().await
    }

    // =========================================================================
    // Albums
    // =========================================================================

    /// Lists the albums of a library-backed category.
    ///
    /// The first album becomes active if none is. Documents have no albums and
    /// return an empty list.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` without access, or `SourceUnavailable` if the
    /// library cannot be queried.
    pub async fn load_albums(&mut self, category: Category) -> Result<Vec<Album>> {
        self.require_access()?;
        let Some(kind) = category.library_kind() else {
            return Ok(Vec::new());
        };

        let albums = match self.services.library.list_groupings(kind).await {
            Ok(albums) => albums,
            Err(err) => {
                let err = Error::from(err);
                tracing::warn!(%category, error = %err, "album listing failed");
                self.pending_error = Some(err.clone());
                return Err(err);
            }
        };
        tracing::debug!(%category, count = albums.len(), "albums loaded");

        let first = albums.first().cloned();
        let feed = self.feed_mut(category);
        feed.set_albums(albums.clone());
        if feed.active_album().is_none() {
            if let Some(album) = first {
                self.bind_album(category, album);
            }
        }
        Ok(albums)
    }

    /// Makes `album` the active album of `category`.
    ///
    /// Switching resets the category's listing; re-selecting the active album
    /// does nothing.
    pub fn select_album(&mut self, category: Category, album: Album) {
        if category.library_kind().is_none() {
            return;
        }
        if self
            .feed(category)
            .active_album()
            .is_some_and(|active| active.same_bucket(&album))
        {
            return;
        }
        self.bind_album(category, album);
    }

    fn bind_album(&mut self, category: Category, album: Album) {
        let Some(kind) = category.library_kind() else {
            return;
        };
        tracing::debug!(%category, album = %album.name, "active album changed");
        let source = AlbumPageSource::new(Arc::clone(&self.services.library), album.clone(), kind);
        let discarded = self.feed_mut(category).set_source(Arc::new(source), Some(album));
        self.prune_selection(discarded);
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Starts fetching the next page of `category`.
    ///
    /// Returns `None` without access, after close, while a fetch of the same
    /// category is in flight, once the listing is exhausted, or before an
    /// album is active.
    pub fn begin_fetch(&mut self, category: Category) -> Option<FetchRequest> {
        if !self.open || !self.access_granted() {
            return None;
        }
        let page_size = self.page_size;
        self.feed_mut(category).begin(page_size)
    }

    /// Applies a finished fetch.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> FetchApplied {
        if !self.open {
            tracing::debug!(category = %outcome.ticket.category, "screen closed, dropping fetch");
            return FetchApplied::Discarded;
        }
        let mut next_stamp = self.next_stamp;
        let applied = self
            .feed_mut(outcome.ticket.category)
            .complete(outcome, &mut next_stamp);
        self.next_stamp = next_stamp;

        if let FetchApplied::Failed(err) = &applied {
            self.pending_error = Some(err.clone());
        }
        applied
    }

    /// Fetches the next page of `category` and applies it.
    ///
    /// Loads the albums first if the category has none yet. Returns `None`
    /// when no fetch could be started.
    pub async fn fetch_next(&mut self, category: Category) -> Option<FetchApplied> {
        if category.library_kind().is_some()
            && !self.feed(category).has_source()
            && self.load_albums(category).await.is_err()
        {
            return None;
        }
        let request = self.begin_fetch(category)?;
        let outcome = request.run().await;
        Some(self.complete_fetch(outcome))
    }

    /// Fetches the next page of several categories concurrently.
    ///
    /// Categories that cannot start a fetch are left out of the result.
    pub async fn fetch_all(&mut self, categories: &[Category]) -> Vec<(Category, FetchApplied)> {
        for &category in categories {
            if category.library_kind().is_some() && !self.feed(category).has_source() {
                // The error is queued for take_error; other categories proceed.
                let _ = self.load_albums(category).await;
            }
        }
        let requests: Vec<FetchRequest> = categories
            .iter()
            .filter_map(|&category| self.begin_fetch(category))
            .collect();

        let outcomes = join_all(requests.into_iter().map(FetchRequest::run)).await;
        outcomes
            .into_iter()
            .map(|outcome| {
                let category = outcome.ticket.category;
                (category, self.complete_fetch(outcome))
            })
            .collect()
    }

    /// Discards the listing of `category`; the next fetch starts at page 0.
    pub fn refresh(&mut self, category: Category) {
        tracing::debug!(%category, "refresh");
        let discarded = self.feed_mut(category).reset();
        self.prune_selection(discarded);
    }

    /// Drops selected ids that are no longer listed anywhere.
    fn prune_selection(&mut self, discarded: Vec<ItemId>) {
        if discarded.is_empty() || self.selection.is_empty() {
            return;
        }
        let orphaned: HashSet<ItemId> = discarded
            .into_iter()
            .filter(|id| !self.is_loaded(id))
            .collect();
        let before = self.selection.len();
        self.selection.retain(|id| !orphaned.contains(id));
        let dropped = before - self.selection.len();
        if dropped > 0 {
            tracing::debug!(dropped, "selection pruned after reset");
        }
    }

    fn is_loaded(&self, id: &ItemId) -> bool {
        self.feeds().iter().any(|feed| feed.page().contains(id))
            || self.browsed_stamps.contains_key(id)
    }

    fn find_loaded(&self, id: &ItemId) -> Option<&MediaItem> {
        self.browse_stack
            .last()
            .and_then(|level| level.items.iter().find(|item| &item.id == id))
            .or_else(|| self.feed(self.active_tab).page().get(id))
            .or_else(|| self.feeds().into_iter().find_map(|feed| feed.page().get(id)))
            .or_else(|| self.browsed.iter().find(|item| &item.id == id))
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Handles a tap on a listed item.
    ///
    /// A [`TapAction::Navigate`] is returned to the host, which decides
    /// whether to call [`Self::enter_directory`]. Unknown ids are ignored.
    pub fn tap(&mut self, id: &ItemId) -> TapAction {
        let Some(item) = self.find_loaded(id).cloned() else {
            return TapAction::Ignored;
        };
        self.selection.tap(&item)
    }

    /// Handles a long press on a listed item.
    pub fn long_press(&mut self, id: &ItemId) -> TapAction {
        let Some(item) = self.find_loaded(id).cloned() else {
            return TapAction::Ignored;
        };
        self.selection.long_press(&item)
    }

    /// Flips membership of `id`, returning the new membership.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        self.selection.toggle(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Returns the selected items and closes the screen.
    ///
    /// Items are ordered by when they were first loaded, across every tab and
    /// every browsed folder. Containers never appear; items whose local file
    /// has vanished are left out.
    ///
    /// The vanished-file check stats each selected file on the calling
    /// thread. Hosts driving a UI thread should use [`Self::confirm_async`].
    pub fn confirm(&mut self) -> Vec<MediaItem> {
        let result = self
            .selection
            .materialize(self.loaded_in_order(), is_available);
        self.finish_confirm(result)
    }

    /// Like [`Self::confirm`], with the vanished-file check run on the
    /// blocking pool.
    pub async fn confirm_async(&mut self) -> Vec<MediaItem> {
        let selected = self.selection.materialize(self.loaded_in_order(), |_| true);
        let result = match tokio::task::spawn_blocking({
            let selected = selected.clone();
            move || selected.into_iter().filter(is_available).collect::<Vec<_>>()
        })
        .await
        {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "availability check failed, checking inline");
                selected.into_iter().filter(is_available).collect()
            }
        };
        self.finish_confirm(result)
    }

    /// Every loaded item, ordered by load stamp across feeds and folders.
    fn loaded_in_order(&self) -> Vec<&MediaItem> {
        let mut loaded: Vec<(u64, &MediaItem)> = Vec::new();
        for feed in self.feeds() {
            loaded.extend(
                feed.items()
                    .iter()
                    .filter_map(|item| feed.stamp_of(&item.id).map(|stamp| (stamp, item))),
            );
        }
        loaded.extend(
            self.browsed
                .iter()
                .filter_map(|item| self.browsed_stamps.get(&item.id).map(|s| (*s, item))),
        );
        loaded.sort_by_key(|(stamp, _)| *stamp);
        loaded.into_iter().map(|(_, item)| item).collect()
    }

    fn finish_confirm(&mut self, result: Vec<MediaItem>) -> Vec<MediaItem> {
        tracing::info!(selected = self.selection.len(), returned = result.len(), "confirm");
        self.selection.clear();
        self.close();
        result
    }

    /// Leaves the screen with no result.
    pub fn cancel(&mut self) {
        tracing::info!("cancel");
        self.selection.clear();
        self.close();
    }

    /// Marks the screen closed; in-flight completions will be dropped.
    pub fn close(&mut self) {
        self.open = false;
        self.browse_stack.clear();
    }

    // =========================================================================
    // Folder navigation
    // =========================================================================

    /// The folder currently shown, if any.
    #[must_use]
    pub fn current_directory(&self) -> Option<&BrowseLevel> {
        self.browse_stack.last()
    }

    #[must_use]
    pub fn browse_depth(&self) -> usize {
        self.browse_stack.len()
    }

    /// Lists `directory` and pushes it on the navigation stack.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` without access, or `ItemUnreadable` if the
    /// folder cannot be listed. The stack is unchanged on error.
    pub async fn enter_directory(&mut self, directory: &Path) -> Result<&BrowseLevel> {
        self.require_access()?;
        let items = match self.services.directories.list(directory).await {
            Ok(items) => items,
            Err(err) => {
                let err = Error::from(err);
                tracing::warn!(directory = %directory.display(), error = %err, "cannot browse");
                self.pending_error = Some(err.clone());
                return Err(err);
            }
        };
        tracing::debug!(directory = %directory.display(), count = items.len(), "entered folder");

        for item in &items {
            if !self.browsed_stamps.contains_key(&item.id) {
                self.browsed_stamps.insert(item.id.clone(), self.next_stamp);
                self.next_stamp += 1;
                self.browsed.push(item.clone());
            }
        }
        self.browse_stack.push(BrowseLevel {
            directory: directory.to_path_buf(),
            items,
        });
        self.browse_stack
            .last()
            .ok_or_else(|| Error::NotFound(directory.to_path_buf()))
    }

    /// Pops one navigation level. Returns the folder now shown, if any.
    pub fn leave_directory(&mut self) -> Option<&Path> {
        self.browse_stack.pop();
        self.browse_stack.last().map(|level| level.directory.as_path())
    }

    // =========================================================================
    // External open
    // =========================================================================

    /// Hands a listed document to the platform's default application.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids, images, videos, containers or
    /// vanished files, and `ItemUnreadable` if the opener fails.
    pub async fn open_externally(&mut self, id: &ItemId) -> Result<()> {
        let item = self
            .find_loaded(id)
            .filter(|item| {
                matches!(item.category, MediaCategory::Document(_))
                    && item.is_selectable()
                    && item.has_local_path()
            })
            .cloned()
            .ok_or_else(|| Error::NotFound(PathBuf::from(id.as_str())))?;

        let result = self
            .services
            .opener
            .open(&item.path, item.mime_type.as_deref())
            .await;
        result.map_err(|err| {
            let err = Error::from(err);
            tracing::warn!(path = %item.path.display(), error = %err, "external open failed");
            self.pending_error = Some(err.clone());
            err
        })
    }
}

impl std::fmt::Debug for PickerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerController")
            .field("images", &self.images)
            .field("videos", &self.videos)
            .field("documents", &self.documents)
            .field("selected", &self.selection.len())
            .field("permission", &self.permission)
            .field("active_tab", &self.active_tab)
            .field("browse_depth", &self.browse_stack.len())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

/// Library assets without a local path are trusted; files must still exist.
fn is_available(item: &MediaItem) -> bool {
    if !item.has_local_path() || item.path.exists() {
        return true;
    }
    tracing::debug!(path = %item.path.display(), "selected file vanished, skipping");
    false
}
