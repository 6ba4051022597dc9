// SPDX-License-Identifier: MPL-2.0
//! Query services (read-side).
//!
//! # Available Services
//!
//! - [`pagination`]: Pulls the next page of a source into a `PageState`
//! - [`feed`]: Per-category listing with ticketed fetches (`CategoryFeed`)

pub mod feed;
pub mod pagination;

// Re-export main types
pub use feed::{CategoryFeed, FeedStatus, FetchApplied, FetchOutcome, FetchRequest, FetchTicket};
pub use pagination::fetch_next_page;
