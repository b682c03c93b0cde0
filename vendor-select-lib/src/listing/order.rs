//! Ordering types for listings.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ListingError;
use crate::model::Fields;
use crate::model::Value;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// Specifies the ordering of listing results.
///
/// Multiple fields can be chained together for secondary, tertiary, etc.
/// sorting. An empty `OrderBy` keeps the provider's natural order.
///
/// # Example
///
/// ```
/// use vendor_select_lib::listing::OrderBy;
///
/// // Single field ordering
/// let order = OrderBy::desc("registered");
///
/// // Multiple field ordering
/// let order = OrderBy::asc("name")
///     .then_desc("id");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub(crate) fields: Vec<(String, Direction)>,
}

impl OrderBy {
    /// Creates an empty ordering.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    /// Returns `true` if no ordering is configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fails if any sort field does not exist on `record`.
    pub(crate) fn check_fields(&self, record: &impl Fields) -> Result<(), ListingError> {
        for (field, _) in &self.fields {
            if record.field(field).is_none() {
                return Err(ListingError::unknown_field(field));
            }
        }
        Ok(())
    }

    /// Compares two records by this ordering.
    ///
    /// Fields must already have been checked with `check_fields`; missing
    /// fields compare as null.
    pub(crate) fn compare(&self, a: &impl Fields, b: &impl Fields) -> Ordering {
        for (field, direction) in &self.fields {
            let left = a.field(field).unwrap_or(Value::Null);
            let right = b.field(field).unwrap_or(Value::Null);
            let ordering = match direction {
                Direction::Asc => left.compare(&right),
                Direction::Desc => right.compare(&left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
