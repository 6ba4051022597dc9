// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core picker logic with no I/O.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `chrono` timestamps on items it has no dependencies on external
//! crates, which keeps every rule here testable without a runtime.
//!
//! # Modules
//!
//! - [`media`]: Item and album types ([`MediaItem`](media::MediaItem),
//!   [`MediaCategory`](media::MediaCategory), [`Album`](media::Album),
//!   [`FileKind`](media::FileKind))
//! - [`paging`]: Pagination state ([`PageState`](paging::PageState),
//!   [`PageSize`](paging::PageSize))
//! - [`permission`]: Library access outcomes ([`PermissionStatus`](permission::PermissionStatus))
//! - [`selection`]: Multi-selection state machine ([`SelectionSet`](selection::SelectionSet),
//!   [`TapAction`](selection::TapAction))

pub mod media;
pub mod paging;
pub mod permission;
pub mod selection;
