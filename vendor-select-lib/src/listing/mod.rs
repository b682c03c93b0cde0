//! Listing provider seam
//!
//! The listing provider owns server-side query state and hands out one
//! visible set at a time. The selection core only ever sees the resulting
//! [`Listing`] snapshot; fetching it is the caller's job.

mod filter;
mod memory;
mod order;
mod page;
mod state;

pub use filter::*;
pub use memory::*;
pub use order::*;
pub use page::*;
pub use state::*;

use async_trait::async_trait;

use crate::error::ListingError;

/// Trait for listing providers.
///
/// Implementations apply the filters, ordering and pagination of a
/// [`TableState`] and return the resulting rows with the total number of
/// matching rows.
///
/// # Example
///
/// ```ignore
/// use vendor_select_lib::listing::{InMemoryListing, ListingProvider, TableState};
///
/// let provider = InMemoryListing::new(vendors);
/// let listing = provider.list(&TableState::new()).await?;
/// workflow.show(listing);
/// ```
#[async_trait]
pub trait ListingProvider<E: Send>: Send + Sync {
    /// Fetches the visible set for `state`.
    async fn list(&self, state: &TableState) -> Result<Listing<E>, ListingError>;
}
