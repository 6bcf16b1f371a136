//! RecordId value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Identifier of a HubSpot CRM object (contact, deal, engagement).
///
/// HubSpot ids are opaque strings. Surrounding whitespace is trimmed and
/// ids that are empty afterwards, or that contain a path separator, are
/// rejected since the id is interpolated into request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Validate `id` as the identifier named `field` (used in the error).
    pub fn parse(field: &'static str, id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyId(field));
        }
        if id.contains('/') {
            return Err(ValidationError::InvalidId(field, id.to_string()));
        }
        Ok(Self(id.to_string()))
    }

    /// Validate an optional id, treating `None` as a missing field.
    pub fn require(field: &'static str, id: Option<&str>) -> Result<Self, ValidationError> {
        match id {
            Some(id) => Self::parse(field, id),
            None => Err(ValidationError::MissingField(field)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
