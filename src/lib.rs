// SPDX-License-Identifier: MPL-2.0
//! `media_picker` is the core of an in-app media picker.
//!
//! It browses the photo/video library and local documents page by page,
//! tracks a multi-selection across category tabs and hands back the confirmed
//! items. Rendering, thumbnails and permission dialogs belong to the host; the
//! crate reaches platform capabilities only through the traits in
//! [`application::port`].
//!
//! # Layers
//!
//! - [`domain`]: Items, albums, pagination state, selection
//! - [`application`]: Ports, paginated feeds and the [`application::picker::PickerController`]
//! - [`infrastructure`]: Filesystem and platform adapters
//! - [`config`]: Persisted settings

#![doc(html_root_url = "https://docs.rs/media_picker/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
