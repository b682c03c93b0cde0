//! Listing provider error types

/// Errors that can occur while producing a listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    /// A filter or sort referenced a field the entity does not have.
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// Pagination was configured with a zero page size.
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}

impl ListingError {
    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }
}
