//! Filter conditions for listings.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ListingError;
use crate::model::Fields;
use crate::model::Value;

/// A filter condition on entity fields.
///
/// Filters can be combined with `And` / `Or` to build compound conditions.
///
/// # Example
///
/// ```
/// use vendor_select_lib::listing::Filter;
///
/// // Simple condition
/// let filter = Filter::contains("name", "poly");
///
/// // Combined condition
/// let filter = Filter::and([
///     Filter::contains("name", "poly"),
///     Filter::gt("empty_spool_weight", 100.0),
/// ]);
///
/// // Using combinators
/// let filter = Filter::is_not_null("comment")
///     .or_else(Filter::is_in("id", [1i64, 2, 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Equality.
    Eq(String, Value),
    /// Not equal.
    Ne(String, Value),
    /// Greater than.
    Gt(String, Value),
    /// Greater than or equal.
    Ge(String, Value),
    /// Less than.
    Lt(String, Value),
    /// Less than or equal.
    Le(String, Value),
    /// Case-insensitive substring match on the field's display text.
    Contains(String, String),
    /// Field equals any of the listed values.
    In(String, Vec<Value>),
    /// Field is null.
    IsNull(String),
    /// Field is not null.
    IsNotNull(String),
    /// Logical AND of multiple filters.
    And(Vec<Filter>),
    /// Logical OR of multiple filters.
    Or(Vec<Filter>),
}

impl Filter {
    /// Creates an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    /// Creates a not-equal filter.
    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Ne(field.into(), value.into())
    }

    /// Creates a greater-than filter.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Gt(field.into(), value.into())
    }

    /// Creates a greater-than-or-equal filter.
    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Ge(field.into(), value.into())
    }

    /// Creates a less-than filter.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Lt(field.into(), value.into())
    }

    /// Creates a less-than-or-equal filter.
    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Le(field.into(), value.into())
    }

    /// Creates a case-insensitive contains filter.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains(field.into(), value.into())
    }

    /// Creates a membership filter.
    pub fn is_in<V: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(field.into(), values.into_iter().map(Into::into).collect())
    }

    /// Creates an is-null filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        Filter::IsNull(field.into())
    }

    /// Creates an is-not-null filter.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Filter::IsNotNull(field.into())
    }

    /// Creates a logical AND of multiple filters.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// Creates a logical OR of multiple filters.
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// Combines this filter with another using logical AND.
    pub fn and_also(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            _ => Filter::And(vec![self, other]),
        }
    }

    /// Combines this filter with another using logical OR.
    pub fn or_else(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut filters) => {
                filters.push(other);
                Filter::Or(filters)
            }
            _ => Filter::Or(vec![self, other]),
        }
    }

    /// Evaluates this filter against a record.
    ///
    /// Fails with [`ListingError::UnknownField`] if any referenced field does
    /// not exist on the record. Comparisons against `Null` are false.
    pub fn matches(&self, record: &impl Fields) -> Result<bool, ListingError> {
        let lookup = |field: &str| {
            record
                .field(field)
                .ok_or_else(|| ListingError::unknown_field(field))
        };
        let ordered = |field: &str,
                       value: &Value,
                       accept: fn(Ordering) -> bool|
         -> Result<bool, ListingError> {
            let actual = lookup(field)?;
            if actual.is_null() || value.is_null() {
                return Ok(false);
            }
            Ok(accept(actual.compare(value)))
        };

        match self {
            Filter::Eq(field, value) => Ok(lookup(field)?.loosely_eq(value)),
            Filter::Ne(field, value) => Ok(!lookup(field)?.loosely_eq(value)),
            Filter::Gt(field, value) => ordered(field, value, Ordering::is_gt),
            Filter::Ge(field, value) => ordered(field, value, Ordering::is_ge),
            Filter::Lt(field, value) => ordered(field, value, Ordering::is_lt),
            Filter::Le(field, value) => ordered(field, value, Ordering::is_le),
            Filter::Contains(field, needle) => {
                let actual = lookup(field)?;
                if actual.is_null() {
                    return Ok(false);
                }
                Ok(actual
                    .to_string()
                    .to_lowercase()
                    .contains(&needle.to_lowercase()))
            }
            Filter::In(field, values) => {
                let actual = lookup(field)?;
                Ok(values.iter().any(|value| actual.loosely_eq(value)))
            }
            Filter::IsNull(field) => Ok(lookup(field)?.is_null()),
            Filter::IsNotNull(field) => Ok(!lookup(field)?.is_null()),
            Filter::And(filters) => {
                for filter in filters {
                    if !filter.matches(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Filter::Or(filters) => {
                for filter in filters {
                    if filter.matches(record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vendor;

    fn polymaker() -> Vendor {
        Vendor::new(3, "Polymaker")
            .with_empty_spool_weight(140.0)
            .with_extra("country", "CN")
    }

    #[test]
    fn test_simple_filters() {
        let vendor = polymaker();

        assert!(Filter::eq("id", 3i64).matches(&vendor).unwrap());
        assert!(Filter::ne("name", "Prusament").matches(&vendor).unwrap());
        assert!(Filter::gt("empty_spool_weight", 100i64).matches(&vendor).unwrap());
        assert!(!Filter::lt("empty_spool_weight", 100.0).matches(&vendor).unwrap());
        assert!(Filter::is_null("comment").matches(&vendor).unwrap());
        assert!(Filter::eq("extra.country", "CN").matches(&vendor).unwrap());
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let vendor = polymaker();

        assert!(Filter::contains("name", "POLY").matches(&vendor).unwrap());
        assert!(!Filter::contains("comment", "x").matches(&vendor).unwrap());
    }

    #[test]
    fn test_ordering_against_null_is_false() {
        let vendor = Vendor::new(1, "Bare");

        assert!(!Filter::gt("empty_spool_weight", 0i64).matches(&vendor).unwrap());
        assert!(!Filter::le("empty_spool_weight", 0i64).matches(&vendor).unwrap());
    }

    #[test]
    fn test_combined_filters() {
        let vendor = polymaker();

        let filter = Filter::and([
            Filter::contains("name", "poly"),
            Filter::is_in("id", [1i64, 2, 3]),
        ]);
        assert!(filter.matches(&vendor).unwrap());

        let filter = Filter::eq("id", 9i64).or_else(Filter::is_not_null("comment"));
        assert!(!filter.matches(&vendor).unwrap());
    }

    #[test]
    fn test_unknown_field() {
        let err = Filter::eq("colour", "red").matches(&polymaker()).unwrap_err();
        assert_eq!(err, ListingError::UnknownField("colour".to_string()));
    }
}
