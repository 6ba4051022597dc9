// SPDX-License-Identifier: MPL-2.0
//! Paginated aggregator.
//!
//! Pulls the next page of a [`PageSource`] into a [`PageState`]. The state
//! transition itself is pure ([`PageState::advance`]); this module adds the
//! source call and the failure rule: a failed page leaves the state exactly
//! as it was so the same page is requested again on retry.

use crate::application::port::{PageSource, SourceError};
use crate::domain::paging::{PageSize, PageState};

/// Fetches the page after `state` and returns the advanced state.
///
/// An exhausted state (`has_more == false`) is returned unchanged without
/// calling the source.
///
/// # Errors
///
/// Returns the source's [`SourceError`] if the page could not be fetched.
/// The caller keeps its current state in that case.
pub async fn fetch_next_page(
    source: &dyn PageSource,
    state: &PageState,
    page_size: PageSize,
) -> Result<PageState, SourceError> {
    if !state.has_more() {
        tracing::debug!(source = %source.label(), "listing exhausted, skipping fetch");
        return Ok(state.clone());
    }

    let page_index = state.page_index();
    tracing::debug!(
        source = %source.label(),
        page_index,
        page_size = page_size.get(),
        "fetching page"
    );

    match source.fetch_page(page_index, page_size).await {
        Ok(page) => {
            let returned = page.len();
            let next = state.advance_filtered(page, page_size, |item| source.admits(item));
            tracing::debug!(
                source = %source.label(),
                page_index,
                returned,
                appended = next.len() - state.len(),
                has_more = next.has_more(),
                "page fetched"
            );
            Ok(next)
        }
        Err(err) => {
            tracing::warn!(
                source = %source.label(),
                page_index,
                error = %err,
                "page fetch failed"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{MediaCategory, MediaItem};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves `total` images and fails on the page listed in `fail_on`.
    struct CountingSource {
        total: usize,
        fail_on: Option<usize>,
        calls: AtomicUsize,
    }

    impl CountingSource {
        fn new(total: usize) -> Self {
            Self {
                total,
                fail_on: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PageSource for CountingSource {
        async fn fetch_page(
            &self,
            page_index: usize,
            page_size: PageSize,
        ) -> Result<Vec<MediaItem>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(page_index) {
                return Err(SourceError::Unavailable("offline".into()));
            }
            let start = (page_index * page_size.get()).min(self.total);
            let end = (start + page_size.get()).min(self.total);
            Ok((start..end)
                .map(|i| {
                    MediaItem::asset(format!("a{i}"), "", format!("A{i}"), MediaCategory::Image)
                })
                .collect())
        }

        fn label(&self) -> String {
            "counting".into()
        }
    }

    #[tokio::test]
    async fn pages_accumulate_until_a_short_page() {
        let source = CountingSource::new(45);
        let size = PageSize::new(30);

        let first = fetch_next_page(&source, &PageState::new(), size)
            .await
            .expect("first page");
        assert_eq!((first.len(), first.page_index(), first.has_more()), (30, 1, true));

        let second = fetch_next_page(&source, &first, size)
            .await
            .expect("second page");
        assert_eq!((second.len(), second.page_index(), second.has_more()), (45, 2, false));

        let third = fetch_next_page(&source, &second, size)
            .await
            .expect("no-op");
        assert_eq!(third, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_page_leaves_state_untouched() {
        let mut source = CountingSource::new(90);
        source.fail_on = Some(1);
        let size = PageSize::new(30);

        let first = fetch_next_page(&source, &PageState::new(), size)
            .await
            .expect("first page");
        let err = fetch_next_page(&source, &first, size)
            .await
            .expect_err("second page fails");

        assert_eq!(err, SourceError::Unavailable("offline".into()));
        assert_eq!(first.page_index(), 1);
        assert_eq!(first.len(), 30);
        assert!(first.has_more());
    }

    #[tokio::test]
    async fn empty_source_is_exhausted_after_one_fetch() {
        let source = CountingSource::new(0);
        let state = fetch_next_page(&source, &PageState::new(), PageSize::default())
            .await
            .expect("empty page");
        assert!(state.is_empty());
        assert!(!state.has_more());
        assert_eq!(state.page_index(), 1);
    }
}
