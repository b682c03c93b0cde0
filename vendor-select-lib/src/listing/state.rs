//! Server-side table state.

use serde::Deserialize;
use serde::Serialize;

use super::Filter;
use super::OrderBy;
use super::Pagination;

/// Sort, filter and pagination settings for one listing view.
///
/// This is what the listing provider queries with, and what gets persisted
/// as a view preference. It never carries selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub sorters: OrderBy,
    pub filters: Vec<Filter>,
    pub pagination: Pagination,
}

impl TableState {
    /// Creates a table state with no sorting, no filters and default paging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ordering.
    pub fn with_sorters(mut self, sorters: OrderBy) -> Self {
        self.sorters = sorters;
        self
    }

    /// Adds a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the pagination.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Adds a filter and returns to the first page.
    pub fn push_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
        self.pagination.current = 1;
    }

    /// Removes all filters and returns to the first page.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.pagination.current = 1;
    }

    /// The active filters combined with AND, or `None` if there are none.
    pub fn combined_filter(&self) -> Option<Filter> {
        match self.filters.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(Filter::and(many.iter().cloned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = TableState::new().with_pagination(Pagination::server(4, 10));

        state.push_filter(Filter::contains("name", "poly"));
        assert_eq!(state.pagination.current, 1);

        state.pagination.current = 3;
        state.clear_filters();
        assert_eq!(state.pagination.current, 1);
        assert!(state.combined_filter().is_none());
    }

    #[test]
    fn test_combined_filter() {
        let state = TableState::new()
            .with_filter(Filter::contains("name", "a"))
            .with_filter(Filter::is_null("comment"));

        assert_eq!(
            state.combined_filter(),
            Some(Filter::and([
                Filter::contains("name", "a"),
                Filter::is_null("comment"),
            ]))
        );
    }
}
