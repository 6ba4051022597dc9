// SPDX-License-Identifier: MPL-2.0
//! Per-category feed: pagination state plus fetch bookkeeping.
//!
//! A [`CategoryFeed`] owns one tab's [`PageState`], its active album and the
//! loading flag that keeps at most one fetch in flight. Fetches are split in
//! two halves so the controller never holds a borrow across an await:
//!
//! 1. [`CategoryFeed::begin`] hands out a [`FetchRequest`] stamped with a
//!    [`FetchTicket`].
//! 2. The request runs detached ([`FetchRequest::run`]).
//! 3. [`CategoryFeed::complete`] applies the [`FetchOutcome`] only if its
//!    ticket is still current; otherwise it is dropped.

use super::pagination::fetch_next_page;
use crate::application::port::{PageSource, SourceError};
use crate::domain::media::{Album, Category, ItemId, MediaItem};
use crate::domain::paging::{PageSize, PageState};
use crate::error::Error;
use std::collections::HashMap;
use std::sync::Arc;

// =============================================================================
// Tickets and requests
// =============================================================================

/// Identifies one fetch. A completion is applied only while its generation
/// matches the feed's current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub category: Category,
    pub generation: u64,
}

/// A fetch ready to run. Owns everything it needs so it can be moved into a
/// spawned task.
pub struct FetchRequest {
    ticket: FetchTicket,
    source: Arc<dyn PageSource>,
    snapshot: PageState,
    page_size: PageSize,
}

impl FetchRequest {
    #[must_use]
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    /// Index of the page this request asks for.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.snapshot.page_index()
    }

    /// Runs the fetch against the source.
    pub async fn run(self) -> FetchOutcome {
        let result = fetch_next_page(self.source.as_ref(), &self.snapshot, self.page_size).await;
        FetchOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchRequest")
            .field("ticket", &self.ticket)
            .field("source", &self.source.label())
            .field("page_index", &self.snapshot.page_index())
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Result of a finished [`FetchRequest`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<PageState, SourceError>,
}

/// What [`CategoryFeed::complete`] did with an outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchApplied {
    /// The page was applied; `n` new items were appended.
    Appended(usize),
    /// The ticket was stale (refresh, album switch or closed screen).
    Discarded,
    /// The page failed; previously loaded pages are retained.
    Failed(Error),
}

/// Display state of a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Library access has not been granted.
    NeedsPermission,
    /// Nothing requested yet.
    Idle,
    Loading,
    /// Items are listed; `has_more` tells whether scrolling can load more.
    Ready { has_more: bool },
    /// The listing finished with no items.
    Empty,
    /// The last fetch failed. Retrying requests the same page again.
    Failed,
}

// =============================================================================
// CategoryFeed
// =============================================================================

/// Listing state of one category tab.
pub struct CategoryFeed {
    category: Category,
    page: PageState,
    source: Option<Arc<dyn PageSource>>,
    albums: Vec<Album>,
    active_album: Option<Album>,
    loading: bool,
    failed: bool,
    generation: u64,
    /// Global load order of each listed item, used to order a confirmed result
    /// across tabs.
    stamps: HashMap<ItemId, u64>,
}

impl CategoryFeed {
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            page: PageState::new(),
            source: None,
            albums: Vec::new(),
            active_album: None,
            loading: false,
            failed: false,
            generation: 0,
            stamps: HashMap::new(),
        }
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn page(&self) -> &PageState {
        &self.page
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        self.page.items()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn set_albums(&mut self, albums: Vec<Album>) {
        self.albums = albums;
    }

    #[must_use]
    pub fn active_album(&self) -> Option<&Album> {
        self.active_album.as_ref()
    }

    /// Load stamp of a listed item.
    #[must_use]
    pub fn stamp_of(&self, id: &ItemId) -> Option<u64> {
        self.stamps.get(id).copied()
    }

    /// Replaces the source and resets the listing.
    ///
    /// Returns the ids that were listed before the reset.
    pub fn set_source(&mut self, source: Arc<dyn PageSource>, album: Option<Album>) -> Vec<ItemId> {
        self.source = Some(source);
        self.active_album = album;
        self.reset()
    }

    /// Drops every listed item and invalidates in-flight fetches.
    ///
    /// Returns the ids that were listed before the reset.
    pub fn reset(&mut self) -> Vec<ItemId> {
        let discarded = self.page.items().iter().map(|i| i.id.clone()).collect();
        self.page.reset();
        self.stamps.clear();
        self.loading = false;
        self.failed = false;
        self.generation += 1;
        tracing::debug!(
            category = %self.category,
            generation = self.generation,
            "feed reset"
        );
        discarded
    }

    /// Starts a fetch for the next page.
    ///
    /// Returns `None` when no source is bound, a fetch is already in flight or
    /// the listing is exhausted.
    pub fn begin(&mut self, page_size: PageSize) -> Option<FetchRequest> {
        if self.loading || !self.page.has_more() {
            return None;
        }
        let source = self.source.clone()?;
        self.loading = true;
        self.failed = false;
        Some(FetchRequest {
            ticket: FetchTicket {
                category: self.category,
                generation: self.generation,
            },
            source,
            snapshot: self.page.clone(),
            page_size,
        })
    }

    /// Applies a finished fetch if its ticket is current.
    ///
    /// Newly appended items get consecutive stamps drawn from `next_stamp`.
    pub fn complete(&mut self, outcome: FetchOutcome, next_stamp: &mut u64) -> FetchApplied {
        if outcome.ticket.category != self.category || outcome.ticket.generation != self.generation
        {
            tracing::debug!(
                category = %self.category,
                ticket_generation = outcome.ticket.generation,
                current_generation = self.generation,
                "discarding stale fetch"
            );
            return FetchApplied::Discarded;
        }
        self.loading = false;

        match outcome.result {
            Ok(next) => {
                let before = self.page.len();
                for item in next.items().iter().skip(before) {
                    self.stamps.insert(item.id.clone(), *next_stamp);
                    *next_stamp += 1;
                }
                self.page = next;
                FetchApplied::Appended(self.page.len().saturating_sub(before))
            }
            Err(err) => {
                self.failed = true;
                FetchApplied::Failed(err.into())
            }
        }
    }

    /// Display state, assuming permission has been granted.
    #[must_use]
    pub fn status(&self) -> FeedStatus {
        if self.loading {
            FeedStatus::Loading
        } else if self.failed {
            FeedStatus::Failed
        } else if !self.page.is_empty() {
            FeedStatus::Ready {
                has_more: self.page.has_more(),
            }
        } else if self.page.has_more() {
            FeedStatus::Idle
        } else {
            FeedStatus::Empty
        }
    }
}

impl std::fmt::Debug for CategoryFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryFeed")
            .field("category", &self.category)
            .field("items", &self.page.len())
            .field("page_index", &self.page.page_index())
            .field("has_more", &self.page.has_more())
            .field("active_album", &self.active_album)
            .field("loading", &self.loading)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaCategory;
    use async_trait::async_trait;

    struct FixedSource(usize);

    #[async_trait]
    impl PageSource for FixedSource {
        async fn fetch_page(
            &self,
            page_index: usize,
            page_size: PageSize,
        ) -> Result<Vec<MediaItem>, SourceError> {
            let start = (page_index * page_size.get()).min(self.0);
            let end = (start + page_size.get()).min(self.0);
            Ok((start..end)
                .map(|i| MediaItem::asset(format!("v{i}"), "", "clip", MediaCategory::Video))
                .collect())
        }

        fn label(&self) -> String {
            "fixed".into()
        }
    }

    fn feed_with(total: usize) -> CategoryFeed {
        let mut feed = CategoryFeed::new(Category::Video);
        feed.set_source(Arc::new(FixedSource(total)), None);
        feed
    }

    #[tokio::test]
    async fn only_one_fetch_in_flight() {
        let mut feed = feed_with(10);
        let request = feed.begin(PageSize::new(4)).expect("first begin");
        assert!(feed.begin(PageSize::new(4)).is_none());
        assert_eq!(feed.status(), FeedStatus::Loading);

        let mut stamp = 0;
        let applied = feed.complete(request.run().await, &mut stamp);
        assert_eq!(applied, FetchApplied::Appended(4));
        assert_eq!(stamp, 4);
        assert_eq!(feed.status(), FeedStatus::Ready { has_more: true });
        assert!(feed.begin(PageSize::new(4)).is_some());
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let mut feed = feed_with(10);
        let request = feed.begin(PageSize::new(4)).expect("begin");
        feed.reset();

        let mut stamp = 0;
        let applied = feed.complete(request.run().await, &mut stamp);
        assert_eq!(applied, FetchApplied::Discarded);
        assert!(feed.items().is_empty());
        assert_eq!(feed.status(), FeedStatus::Idle);
        assert_eq!(stamp, 0);
    }

    #[tokio::test]
    async fn stamps_follow_load_order() {
        let mut feed = feed_with(3);
        let mut stamp = 100;
        let request = feed.begin(PageSize::new(5)).expect("begin");
        feed.complete(request.run().await, &mut stamp);

        assert_eq!(feed.stamp_of(&ItemId::new("v0")), Some(100));
        assert_eq!(feed.stamp_of(&ItemId::new("v2")), Some(102));
        assert_eq!(feed.status(), FeedStatus::Ready { has_more: false });
        assert!(feed.begin(PageSize::new(5)).is_none());
    }

    #[tokio::test]
    async fn empty_listing_reports_empty() {
        let mut feed = feed_with(0);
        let mut stamp = 0;
        let request = feed.begin(PageSize::new(5)).expect("begin");
        feed.complete(request.run().await, &mut stamp);
        assert_eq!(feed.status(), FeedStatus::Empty);
    }

    #[test]
    fn begin_without_source_does_nothing() {
        let mut feed = CategoryFeed::new(Category::Image);
        assert!(feed.begin(PageSize::default()).is_none());
        assert!(!feed.is_loading());
    }

    #[tokio::test]
    async fn reset_returns_listed_ids_and_bumps_generation() {
        let mut feed = feed_with(2);
        let mut stamp = 0;
        let request = feed.begin(PageSize::new(5)).expect("begin");
        feed.complete(request.run().await, &mut stamp);

        let generation = feed.generation();
        let discarded = feed.reset();
        assert_eq!(discarded, vec![ItemId::new("v0"), ItemId::new("v1")]);
        assert_eq!(feed.generation(), generation + 1);
        assert_eq!(feed.stamp_of(&ItemId::new("v0")), None);
    }
}
