//! Entity and field access traits

use std::fmt::Debug;
use std::hash::Hash;

use super::Value;

/// A selectable record with a stable identifier.
///
/// The identifier is the only part of an entity the selection core
/// interprets. It must stay the same for a given record across filter, sort
/// and page changes, since selection is keyed on it rather than on row
/// position.
///
/// # Example
///
/// ```
/// use vendor_select_lib::model::Entity;
///
/// #[derive(Clone)]
/// struct Spool {
///     id: u32,
/// }
///
/// impl Entity for Spool {
///     type Id = u32;
///
///     fn id(&self) -> u32 {
///         self.id
///     }
/// }
/// ```
pub trait Entity {
    /// Identifier type.
    type Id: Clone + Eq + Hash + Ord + Debug;

    /// Returns the identifier of this record.
    fn id(&self) -> Self::Id;
}

/// Named field access used by listing providers to filter and sort.
pub trait Fields {
    /// Returns the value of a field, or `None` if the field does not exist.
    ///
    /// A field that exists but is empty must return `Some(Value::Null)`.
    fn field(&self, name: &str) -> Option<Value>;
}
