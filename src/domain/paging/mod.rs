// SPDX-License-Identifier: MPL-2.0
//! Pagination state for one category listing.
//!
//! [`PageState`] is the pure half of the paginated aggregator: it knows how a
//! page of results advances the listing but never talks to a source. The
//! asynchronous half lives in [`crate::application::query::pagination`].

pub mod newtypes;

pub use newtypes::{page_size_bounds, PageSize};

use crate::domain::media::{ItemId, MediaItem};
use std::collections::HashSet;

/// Accumulated listing of one category.
///
/// Lifecycle: created at screen entry, reset on album change or refresh,
/// dropped with the screen. Between resets `items` only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    page_index: usize,
    has_more: bool,
    items: Vec<MediaItem>,
    ids: HashSet<ItemId>,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageState {
    /// Creates the initial state `{page_index: 0, has_more: true, items: []}`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_index: 0,
            has_more: true,
            items: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Index of the next page to request.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Items accumulated so far, in load order.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Looks up a loaded item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&MediaItem> {
        if !self.contains(id) {
            return None;
        }
        self.items.iter().find(|item| &item.id == id)
    }

    /// Applies one successfully fetched page and returns the next state.
    ///
    /// Exhausted states are returned unchanged. Otherwise the page index is
    /// incremented, `has_more` reflects whether the page was full, and items
    /// whose id is already listed are skipped. `has_more` is computed from the
    /// number of items the source returned, not the number appended.
    #[must_use]
    pub fn advance(&self, page: Vec<MediaItem>, page_size: PageSize) -> PageState {
        self.advance_filtered(page, page_size, |_| true)
    }

    /// Like [`Self::advance`], but only appends items for which `admit` holds.
    ///
    /// Rejected items still count as returned, so a full page of mixed kinds
    /// keeps the listing open.
    #[must_use]
    pub fn advance_filtered(
        &self,
        page: Vec<MediaItem>,
        page_size: PageSize,
        mut admit: impl FnMut(&MediaItem) -> bool,
    ) -> PageState {
        if !self.has_more {
            return self.clone();
        }

        let returned = page.len();
        let mut next = self.clone();
        for item in page {
            if admit(&item) && next.ids.insert(item.id.clone()) {
                next.items.push(item);
            }
        }
        next.page_index += 1;
        next.has_more = page_size.is_full(returned);
        next
    }

    /// Returns the state to its initial value.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaCategory;

    fn images(range: std::ops::Range<usize>) -> Vec<MediaItem> {
        range
            .map(|i| {
                MediaItem::asset(format!("img-{i}"), "", format!("IMG_{i}"), MediaCategory::Image)
            })
            .collect()
    }

    #[test]
    fn new_state_is_initial() {
        let state = PageState::new();
        assert_eq!(state.page_index(), 0);
        assert!(state.has_more());
        assert!(state.is_empty());
        assert_eq!(state, PageState::default());
    }

    #[test]
    fn forty_five_items_in_pages_of_thirty() {
        let size = PageSize::new(30);
        let first = PageState::new().advance(images(0..30), size);
        assert_eq!(first.len(), 30);
        assert_eq!(first.page_index(), 1);
        assert!(first.has_more());

        let second = first.advance(images(30..45), size);
        assert_eq!(second.len(), 45);
        assert_eq!(second.page_index(), 2);
        assert!(!second.has_more());
    }

    #[test]
    fn exact_page_defers_end_of_data_to_next_fetch() {
        let size = PageSize::new(10);
        let state = PageState::new().advance(images(0..10), size);
        assert!(state.has_more());

        let state = state.advance(Vec::new(), size);
        assert!(!state.has_more());
        assert_eq!(state.page_index(), 2);
        assert_eq!(state.len(), 10);
    }

    #[test]
    fn exhausted_state_is_a_no_op() {
        let size = PageSize::new(10);
        let done = PageState::new().advance(images(0..3), size);
        assert!(!done.has_more());

        let again = done.advance(images(3..6), size);
        assert_eq!(again, done);
    }

    #[test]
    fn duplicate_ids_are_skipped_but_count_toward_has_more() {
        let size = PageSize::new(3);
        let state = PageState::new().advance(images(0..3), size);
        let state = state.advance(images(2..5), size);

        assert_eq!(state.len(), 5);
        assert!(state.has_more());
        let ids: Vec<_> = state.items().iter().map(|i| i.id.as_str().to_string()).collect();
        assert_eq!(ids, ["img-0", "img-1", "img-2", "img-3", "img-4"]);
    }

    #[test]
    fn filtered_items_still_count_toward_has_more() {
        let size = PageSize::new(4);
        let mut page = images(0..2);
        page.extend((0..2).map(|i| {
            MediaItem::asset(format!("vid-{i}"), "", format!("VID_{i}"), MediaCategory::Video)
        }));

        let state = PageState::new().advance_filtered(page, size, |item| {
            item.category == MediaCategory::Image
        });
        assert_eq!(state.len(), 2);
        assert!(state.has_more());
        assert_eq!(state.page_index(), 1);
    }

    #[test]
    fn reset_returns_to_initial_value() {
        let mut state = PageState::new().advance(images(0..4), PageSize::new(2));
        assert!(state.contains(&ItemId::new("img-1")));
        assert!(state.get(&ItemId::new("img-3")).is_some());

        state.reset();
        assert_eq!(state, PageState::new());
        assert!(state.get(&ItemId::new("img-1")).is_none());
    }
}
