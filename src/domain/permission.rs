// SPDX-License-Identifier: MPL-2.0
//! Library access outcomes.

use std::fmt;

/// Result of asking the permission broker for library access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Full access; fetches may proceed.
    Granted,
    /// Access refused.
    Denied,
    /// Partial access (e.g. a user-picked subset). Treated like a refusal:
    /// the picker shows its explanation state instead of fetching.
    Limited,
}

impl PermissionStatus {
    /// Returns `true` if fetches are allowed under this status.
    #[must_use]
    pub fn allows_fetch(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PermissionStatus::Granted => "granted",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Limited => "limited",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_granted_allows_fetch() {
        assert!(PermissionStatus::Granted.allows_fetch());
        assert!(!PermissionStatus::Denied.allows_fetch());
        assert!(!PermissionStatus::Limited.allows_fetch());
    }
}
