// SPDX-License-Identifier: MPL-2.0
//! Paging newtypes.
//!
//! This module provides type-safe wrappers for pagination values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Page Size Bounds
// =============================================================================

/// Page size bounds (1 to 500 items).
pub mod page_size_bounds {
    /// Minimum page size.
    pub const MIN: usize = 1;
    /// Maximum page size.
    pub const MAX: usize = 500;
    /// Default page size.
    pub const DEFAULT: usize = 30;
}

// =============================================================================
// PageSize
// =============================================================================

/// Number of items requested per page, guaranteed to be within 1–500.
///
/// A zero page size would make every fetch look like the end of data, so
/// values are clamped on construction.
///
/// # Example
///
/// ```
/// use media_picker::domain::paging::PageSize;
///
/// assert_eq!(PageSize::new(0).get(), 1);
/// assert_eq!(PageSize::default().get(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a new page size, clamping the value to the valid range.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self(size.clamp(page_size_bounds::MIN, page_size_bounds::MAX))
    }

    /// Returns the raw item count.
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// Returns `true` if a page of `returned` items means more may follow.
    ///
    /// A full page is assumed to mean "there might be more"; the real end of
    /// data is only known once a short page comes back.
    #[must_use]
    pub fn is_full(self, returned: usize) -> bool {
        returned >= self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(page_size_bounds::DEFAULT)
    }
}

impl From<usize> for PageSize {
    fn from(size: usize) -> Self {
        Self::new(size)
    }
}
