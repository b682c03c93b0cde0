//! In-memory listing provider

use async_trait::async_trait;
use log::debug;

use super::Listing;
use super::ListingProvider;
use super::TableState;
use crate::error::ListingError;
use crate::model::Fields;

/// A listing provider over records held in memory.
///
/// Filters, then sorts (stable, so ties keep their original order), then
/// slices out the requested page.
///
/// # Example
///
/// ```
/// use vendor_select_lib::listing::{InMemoryListing, TableState};
/// use vendor_select_lib::model::Vendor;
///
/// let provider = InMemoryListing::new(vec![Vendor::new(1, "Polymaker")]);
/// let listing = provider.query(&TableState::new()).unwrap();
/// assert_eq!(listing.total(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryListing<E> {
    records: Vec<E>,
}

impl<E> InMemoryListing<E> {
    /// Creates a provider over the given records.
    pub fn new(records: Vec<E>) -> Self {
        Self { records }
    }

    /// Returns the number of records held (before filtering).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<E: Fields + Clone> InMemoryListing<E> {
    /// Produces the listing for `state` synchronously.
    pub fn query(&self, state: &TableState) -> Result<Listing<E>, ListingError> {
        let filter = state.combined_filter();
        let mut matching = Vec::new();
        for record in &self.records {
            let keep = match &filter {
                Some(filter) => filter.matches(record)?,
                None => true,
            };
            if keep {
                matching.push(record);
            }
        }

        if let Some(first) = matching.first() {
            state.sorters.check_fields(*first)?;
        }
        if !state.sorters.is_empty() {
            matching.sort_by(|a, b| state.sorters.compare(*a, *b));
        }

        let total = matching.len();
        let window = state.pagination.window(total)?;
        let items: Vec<E> = matching[window].iter().map(|record| (*record).clone()).collect();

        debug!(
            "Listing {} of {} matching rows ({} held)",
            items.len(),
            total,
            self.records.len()
        );
        Ok(Listing::new(items, total))
    }
}

#[async_trait]
impl<E> ListingProvider<E> for InMemoryListing<E>
where
    E: Fields + Clone + Send + Sync,
{
    async fn list(&self, state: &TableState) -> Result<Listing<E>, ListingError> {
        self.query(state)
    }
}
