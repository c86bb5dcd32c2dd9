//! Product resource model
//!
//! The objects API stores "products": a display name plus a loosely shaped
//! bag of attributes. Identifier and timestamps are assigned by the server
//! and are never part of an outbound payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A product resource as exchanged with the objects API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nested attributes record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ProductAttributes>,
    /// Set by the server on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the server on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates an outbound product with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the attributes (builder pattern).
    #[must_use]
    pub fn with_attributes(mut self, attributes: ProductAttributes) -> Self {
        self.data = Some(attributes);
        self
    }

    /// Returns the body the client is allowed to send: name and attributes
    /// only, with every server-assigned field cleared.
    #[must_use]
    pub fn to_payload(&self) -> Self {
        Self {
            name: self.name.clone(),
            data: self.data.clone(),
            ..Self::default()
        }
    }

    /// Returns the identifier if it is present and non-empty.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Returns true if `createdAt` is present and later than [`MIN_VALID_TIMESTAMP`].
    #[must_use]
    pub fn has_valid_created_at(&self) -> bool {
        self.created_at.is_some_and(is_valid_timestamp)
    }

    /// Returns true if `updatedAt` is present and later than [`MIN_VALID_TIMESTAMP`].
    #[must_use]
    pub fn has_valid_updated_at(&self) -> bool {
        self.updated_at.is_some_and(is_valid_timestamp)
    }
}

/// The zero date-time. A server timestamp must be strictly later.
pub const MIN_VALID_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// [`MIN_VALID_TIMESTAMP`] as seconds from the Unix epoch.
pub const MIN_VALID_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// Returns true if `value` is strictly later than [`MIN_VALID_TIMESTAMP`].
#[must_use]
pub fn is_valid_timestamp(value: DateTime<Utc>) -> bool {
    (value.timestamp(), value.timestamp_subsec_nanos()) > (MIN_VALID_TIMESTAMP_SECS, 0)
}

/// Product attributes.
///
/// A superset schema: any subset may be populated per scenario and absent
/// fields are omitted on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    /// Colour name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Storage capacity in gigabytes.
    #[serde(
        rename = "capacityGB",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_number::deserialize"
    )]
    pub capacity_gb: Option<u32>,
    /// Price.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_number::deserialize"
    )]
    pub price: Option<f64>,
    /// Product generation, e.g. "3rd".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    /// Model year.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_number::deserialize"
    )]
    pub year: Option<i32>,
    /// CPU model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_model: Option<String>,
    /// Hard disk size, e.g. "1 TB".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_disk_size: Option<String>,
    /// Watch strap colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strap_colour: Option<String>,
    /// Watch case size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_size: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Screen size in inches.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_number::deserialize"
    )]
    pub screen_size: Option<f64>,
}

impl ProductAttributes {
    /// Attributes describing a laptop.
    #[must_use]
    pub fn laptop(
        year: i32,
        price: f64,
        cpu_model: impl Into<String>,
        hard_disk_size: impl Into<String>,
    ) -> Self {
        Self {
            year: Some(year),
            price: Some(price),
            cpu_model: Some(cpu_model.into()),
            hard_disk_size: Some(hard_disk_size.into()),
            ..Self::default()
        }
    }

    /// Attributes carrying only a price and a colour.
    #[must_use]
    pub fn priced(price: f64, color: impl Into<String>) -> Self {
        Self {
            price: Some(price),
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Returns true if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body returned by the objects API after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionMessage {
    /// Confirmation text.
    pub message: String,
}

impl DeletionMessage {
    /// The confirmation the service sends for a deleted identifier.
    #[must_use]
    pub fn for_id(id: &str) -> Self {
        Self {
            message: format!("Object with id = {id} has been deleted."),
        }
    }

    /// Serializes to the exact compact body the service returns.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if serialization fails.
    pub fn to_body(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::InvalidBody(e.to_string()))
    }
}

/// Accepts a JSON number or a string holding one.
mod lenient_number {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText<T> {
        Number(T),
        Text(String),
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr,
        T::Err: Display,
    {
        match Option::<NumberOrText<T>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrText::Number(n)) => Ok(Some(n)),
            Some(NumberOrText::Text(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
        }
    }
}
