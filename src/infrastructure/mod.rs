// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`, backed by the local filesystem and the platform's
//! opener command.
//!
//! # Available Adapters
//!
//! - [`filesystem`]: Document scan, directory library and folder browser
//!   (implement [`PageSource`], [`MediaLibrarySource`], [`DirectoryLister`])
//! - [`permission`]: Readability-based [`PermissionBroker`]
//! - [`opener`]: [`FileOpener`] over `xdg-open` / `open` / `start`
//!
//! [`PageSource`]: crate::application::port::PageSource
//! [`MediaLibrarySource`]: crate::application::port::MediaLibrarySource
//! [`DirectoryLister`]: crate::application::port::DirectoryLister
//! [`PermissionBroker`]: crate::application::port::PermissionBroker
//! [`FileOpener`]: crate::application::port::FileOpener

pub mod filesystem;
pub mod opener;
pub mod permission;

// Re-export main types for convenience
pub use filesystem::{DirectoryBrowser, DocumentScanner, FsMediaLibrary, ScanPolicy};
pub use opener::SystemFileOpener;
pub use permission::FsPermissionBroker;
