// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Every failure the picker can observe is recoverable: the worst outcome is an
//! empty or stalled listing that the user can retry through a refresh or a new
//! permission request.

use crate::application::port::{OpenError, SourceError};
use crate::domain::permission::PermissionStatus;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Access to the media library was refused or only partially granted.
    #[error("Permission required: access is {0}")]
    PermissionDenied(PermissionStatus),

    /// A page fetch failed; previously loaded pages are retained.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// A single file could not be opened or stat'ed.
    #[error("Item unreadable: {}: {reason}", path.display())]
    ItemUnreadable { path: PathBuf, reason: String },

    /// A selected item's backing file no longer exists.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the message key used by hosts to pick a localized explanation.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        match self {
            Error::PermissionDenied(_) => "error-permission-denied",
            Error::SourceUnavailable(_) => "error-source-unavailable",
            Error::ItemUnreadable { .. } => "error-item-unreadable",
            Error::NotFound(_) => "error-not-found",
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
        }
    }

    /// Returns `true` when a manual refresh is the expected recovery path.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::SourceUnavailable(_) | Error::Io(_))
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(msg) => Error::SourceUnavailable(msg),
            SourceError::Unreadable { path, reason } => Error::ItemUnreadable { path, reason },
        }
    }
}

impl From<OpenError> for Error {
    fn from(err: OpenError) -> Self {
        match err {
            OpenError::NotFound(path) => Error::NotFound(path),
            OpenError::Failed { path, reason } => Error::ItemUnreadable { path, reason },
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
