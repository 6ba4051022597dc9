// SPDX-License-Identifier: MPL-2.0
//! Permission broker port definition.

use crate::domain::permission::PermissionStatus;
use async_trait::async_trait;

/// Port for the platform permission plugin.
///
/// A [`PermissionStatus::Denied`] or [`PermissionStatus::Limited`] answer
/// routes the picker to its explanation state; no fetch is attempted.
#[async_trait]
pub trait PermissionBroker: Send + Sync {
    /// Asks for library access, prompting the user if the platform requires it.
    async fn request_access(&self) -> PermissionStatus;

    /// Opens the platform settings page for this app.
    ///
    /// Returns `false` if the platform has no such page.
    async fn open_system_settings(&self) -> bool;
}
