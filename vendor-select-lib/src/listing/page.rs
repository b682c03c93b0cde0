//! Pagination settings and listing pages.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ListingError;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How a listing is split into pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaginationMode {
    /// Every matching row is returned in one listing.
    #[default]
    Off,
    /// The provider returns one page at a time.
    Server,
}

/// Pagination settings for a listing request.
///
/// `current` is 1-based. With [`PaginationMode::Off`] the page fields are
/// kept so switching pagination back on restores the previous position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub mode: PaginationMode,
    pub current: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            mode: PaginationMode::Off,
            current: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Pagination disabled.
    pub fn off() -> Self {
        Self::default()
    }

    /// Server-side pagination at the given 1-based page.
    pub fn server(current: usize, page_size: usize) -> Self {
        Self {
            mode: PaginationMode::Server,
            current,
            page_size,
        }
    }

    /// Returns `true` if pagination is enabled.
    pub fn is_paged(&self) -> bool {
        self.mode == PaginationMode::Server
    }

    /// Index range of the current page within `total` matching rows.
    ///
    /// Pages past the end yield an empty range. Page `0` is treated as page 1.
    pub fn window(&self, total: usize) -> Result<Range<usize>, ListingError> {
        match self.mode {
            PaginationMode::Off => Ok(0..total),
            PaginationMode::Server => {
                if self.page_size == 0 {
                    return Err(ListingError::ZeroPageSize);
                }
                let start = (self.current.max(1) - 1)
                    .saturating_mul(self.page_size)
                    .min(total);
                let end = start.saturating_add(self.page_size).min(total);
                Ok(start..end)
            }
        }
    }

    /// Number of pages needed for `total` rows (at least 1).
    pub fn page_count(&self, total: usize) -> usize {
        match self.mode {
            PaginationMode::Off => 1,
            PaginationMode::Server => total.div_ceil(self.page_size.max(1)).max(1),
        }
    }
}

/// One visible set returned by a listing provider.
///
/// Holds the rows for the active filter/sort/page configuration together
/// with the total number of rows matching the filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<E> {
    items: Vec<E>,
    total: usize,
}

impl<E> Default for Listing<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<E> Listing<E> {
    /// Creates a listing with its rows and the total matching count.
    pub fn new(items: Vec<E>, total: usize) -> Self {
        Self { items, total }
    }

    /// Creates an unpaged listing where the total is the number of rows.
    pub fn all(items: Vec<E>) -> Self {
        let total = items.len();
        Self { items, total }
    }

    /// Returns the visible rows.
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Consumes the listing and returns the rows.
    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    /// Returns the total number of rows matching the filters.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if this listing has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of visible rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
