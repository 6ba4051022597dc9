// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete platform plugins.
//!
//! # Available Ports
//!
//! - [`directory`]: One-level directory listing for folder navigation
//! - [`library`]: Photo/video library albums and pages
//! - [`opener`]: Handing a file to the platform's default application
//! - [`permission`]: Library access negotiation
//! - [`source`]: Generic paged listing consumed by the aggregator
//!
//! # Design Notes
//!
//! - All traits use domain types only
//! - Traits are `Send + Sync` so fetches can run as detached futures
//! - Methods are `async` (via `async-trait`) so adapters can be injected as
//!   `Arc<dyn Trait>` without a process-wide singleton

pub mod directory;
pub mod library;
pub mod opener;
pub mod permission;
pub mod source;

// Re-export main types for convenience
pub use directory::DirectoryLister;
pub use library::{AlbumPageSource, MediaLibrarySource};
pub use opener::{FileOpener, OpenError};
pub use permission::PermissionBroker;
pub use source::{PageSource, SourceError};
