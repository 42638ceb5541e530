//! Data models for Gear Sync
//!
//! This module defines the typed item record and the boundary that turns an
//! untyped catalog response into it. Nothing past [`Item::from_details`] sees
//! raw JSON.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::catalog;
use crate::constants::store::{TAG_OFFSALE, TAG_ONSALE};
use crate::errors::{MalformedResponseError, ValidationResult};

/// Raw detail record as returned by the catalog (or read from the cache)
///
/// Only a handful of fields are consumed; the rest are carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetails {
    id: u64,
    fields: Map<String, Value>,
}

impl RawDetails {
    /// Parse a response body into a raw record
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponseError::InvalidJson` if the body is not JSON and
    /// `MalformedResponseError::NotAnObject` if it is not a JSON object.
    pub fn parse(id: u64, body: &str) -> ValidationResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|source| MalformedResponseError::InvalidJson { id, source })?;

        match value {
            Value::Object(fields) => Ok(Self { id, fields }),
            _ => Err(MalformedResponseError::NotAnObject { id }),
        }
    }

    /// Identifier this record was requested for
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Look up a field by its API name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    fn required(&self, field: &'static str) -> ValidationResult<&Value> {
        match self.fields.get(field) {
            Some(Value::Null) | None => Err(MalformedResponseError::MissingField {
                id: self.id,
                field,
            }),
            Some(value) => Ok(value),
        }
    }

    fn required_str(&self, field: &'static str) -> ValidationResult<&str> {
        self.required(field)?
            .as_str()
            .ok_or(MalformedResponseError::InvalidField {
                id: self.id,
                field,
                expected: "string",
            })
    }

    fn required_bool(&self, field: &'static str) -> ValidationResult<bool> {
        self.required(field)?
            .as_bool()
            .ok_or(MalformedResponseError::InvalidField {
                id: self.id,
                field,
                expected: "boolean",
            })
    }

    fn required_timestamp(&self, field: &'static str) -> ValidationResult<DateTime<Utc>> {
        let raw = self.required_str(field)?;
        parse_timestamp(raw).ok_or_else(|| MalformedResponseError::InvalidTimestamp {
            id: self.id,
            field,
            value: raw.to_string(),
        })
    }
}

/// Parse an ISO-8601 timestamp, assuming UTC when no offset is given
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Collapse CRLF line endings to LF
pub fn normalize_description(raw: &str) -> String {
    raw.replace("\r\n", "\n")
}

/// Sale state tag attached to every manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    Onsale,
    Offsale,
}

impl Tag {
    /// Tag for an on-sale flag
    pub fn for_sale_state(on_sale: bool) -> Self {
        if on_sale {
            Tag::Onsale
        } else {
            Tag::Offsale
        }
    }

    /// Name as written in manifests
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Onsale => TAG_ONSALE,
            Tag::Offsale => TAG_OFFSALE,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Externally assigned identifier
    pub id: u64,
    /// Display name, never empty
    pub name: String,
    /// Description with LF line endings, never empty
    pub description: String,
    /// Whether the item is currently for sale
    pub on_sale: bool,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Last update time
    pub updated: DateTime<Utc>,
}

impl Item {
    /// Validate a raw record and normalize it into an item
    ///
    /// The identifier is taken from the request rather than the payload.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponseError` if a required field is missing, has the
    /// wrong type, is blank, or holds an unparseable timestamp.
    pub fn from_details(details: &RawDetails) -> ValidationResult<Self> {
        let id = details.id();
        let name = details.required_str(catalog::FIELD_NAME)?;
        let raw_description = details.required_str(catalog::FIELD_DESCRIPTION)?;
        let on_sale = details.required_bool(catalog::FIELD_ON_SALE)?;
        let created = details.required_timestamp(catalog::FIELD_CREATED)?;
        let updated = details.required_timestamp(catalog::FIELD_UPDATED)?;

        let description = normalize_description(raw_description);

        if name.trim().is_empty() {
            return Err(MalformedResponseError::EmptyField {
                id,
                field: catalog::FIELD_NAME,
            });
        }
        if description.trim().is_empty() {
            return Err(MalformedResponseError::EmptyField {
                id,
                field: catalog::FIELD_DESCRIPTION,
            });
        }

        Ok(Self {
            id,
            name: name.to_string(),
            description,
            on_sale,
            created,
            updated,
        })
    }

    /// Derived tag set, currently exactly one sale state tag
    pub fn tags(&self) -> Vec<Tag> {
        vec![Tag::for_sale_state(self.on_sale)]
    }
}
