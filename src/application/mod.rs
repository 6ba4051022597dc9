// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`query`]: Pagination and per-category feeds
//! - [`picker`]: The screen-level controller tying feeds, selection and
//!   permission together
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Hosts drive the [`picker::PickerController`]
//!
//! # Example
//!
//! ```ignore
//! use media_picker::application::picker::{PickerController, PickerServices};
//! use media_picker::domain::media::Category;
//! use media_picker::domain::paging::PageSize;
//!
//! let mut picker = PickerController::new(services, PageSize::default());
//! picker.request_permission().await;
//! picker.fetch_next(Category::Image).await;
//! ```

pub mod picker;
pub mod port;
pub mod query;
