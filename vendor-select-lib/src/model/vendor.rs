//! Vendor record

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::Entity;
use super::Fields;
use super::Value;

/// Prefix addressing entries of [`Vendor::extra`] through [`Fields`].
pub const EXTRA_PREFIX: &str = "extra.";

/// A filament vendor as returned by the listing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,
    pub registered: DateTime<Utc>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Weight of an empty spool from this vendor, in grams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_spool_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Free-form extra fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Vendor {
    /// Creates a vendor registered now with only the required fields set.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            registered: Utc::now(),
            name: name.into(),
            comment: None,
            empty_spool_weight: None,
            external_id: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sets the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the empty spool weight in grams.
    pub fn with_empty_spool_weight(mut self, grams: f64) -> Self {
        self.empty_spool_weight = Some(grams);
        self
    }

    /// Sets an extra field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Entity for Vendor {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Fields for Vendor {
    fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "id" => Value::Long(self.id),
            "registered" => Value::DateTime(self.registered),
            "name" => Value::String(self.name.clone()),
            "comment" => self.comment.clone().into(),
            "empty_spool_weight" => self.empty_spool_weight.into(),
            "external_id" => self.external_id.clone().into(),
            other => {
                let key = other.strip_prefix(EXTRA_PREFIX)?;
                // Missing extra keys are empty rather than unknown.
                self.extra.get(key).cloned().into()
            }
        };
        Some(value)
    }
}
