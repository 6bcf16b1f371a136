//! Raw CRM object envelopes as returned by the HubSpot v3 object APIs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// A CRM object (contact, deal, call, note, ...) with its flat property map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    /// Object id
    pub id: String,

    /// Requested properties; HubSpot sends unset properties as `null`
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub archived: bool,
}

impl CrmObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder-style property setter, mostly for fixtures.
    pub fn with_property(mut self, name: &str, value: impl Into<String>) -> Self {
        self.properties
            .insert(name.to_string(), Value::String(value.into()));
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// A string property, or `None` when absent, null or blank.
    pub fn property(&self, name: &str) -> Option<&str> {
        match self.properties.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Response of `POST /crm/v3/objects/{type}/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: usize,

    #[serde(default)]
    pub results: Vec<CrmObject>,
}

/// Response of `GET /crm/v3/objects/contacts/{id}/associations/{type}`.
#[derive(Debug, Deserialize)]
pub struct AssociationsResponse {
    #[serde(default)]
    pub results: Vec<AssociatedObject>,
}

impl AssociationsResponse {
    /// Associated ids in the order the API returned them.
    ///
    /// v3 lists an object once per association type, so repeated ids are
    /// dropped after their first occurrence.
    pub fn into_ids(self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.results
            .into_iter()
            .map(|r| r.id)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}

/// One association row. v3 sends `id` as a string, v4 sends a numeric
/// `toObjectId`; both are accepted.
#[derive(Debug, Deserialize)]
pub struct AssociatedObject {
    #[serde(alias = "toObjectId", deserialize_with = "deserialize_id")]
    pub id: String,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
