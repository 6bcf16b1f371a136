//! HTTP client for the HubSpot CRM v3 REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles bearer authentication, error
//! mapping and response decoding. Every request checks for a configured access token
//! first, so a missing token fails without touching the network.

mod async_wrapper;
pub use async_wrapper::{AsyncHubSpotClient, AsyncHubSpotClientImpl};

use crate::config::Config;
use crate::error::{CrmApiError, CrmApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{
    AssociationsResponse, CrmObject, EngagementKind, Pipeline, PipelinesResponse, SearchResponse,
    CONTACT_PROPERTIES,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;

/// Maximum contacts returned by an email search.
const EMAIL_SEARCH_LIMIT: usize = 10;

/// The object a new note is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteTarget {
    Contact(String),
    Deal(String),
}

impl NoteTarget {
    /// HubSpot-defined association type id for note → target.
    fn association_type_id(&self) -> u32 {
        match self {
            NoteTarget::Contact(_) => 202,
            NoteTarget::Deal(_) => 214,
        }
    }

    fn id(&self) -> &str {
        match self {
            NoteTarget::Contact(id) | NoteTarget::Deal(id) => id,
        }
    }
}

/// HTTP client for the HubSpot CRM API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct HubSpotClient {
    base_url: String,

    /// Bearer token; `None` makes every call fail with `MissingCredential`
    access_token: Option<String>,

    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

impl HubSpotClient {
    /// Create a new HubSpotClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            config.access_token.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a HubSpotClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, access_token: Option<String>) -> Self {
        Self::build(base_url, access_token, Duration::from_secs(10))
    }

    fn build(base_url: String, access_token: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            access_token,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// The `Authorization` header value, or `MissingCredential`.
    fn bearer(&self) -> CrmApiResult<String> {
        self.access_token
            .as_deref()
            .map(|token| format!("Bearer {}", token))
            .ok_or(CrmApiError::MissingCredential)
    }

    /// Send an authenticated request, optionally with a JSON body.
    fn send(&self, method: &str, path: &str, body: Option<&Value>) -> CrmApiResult<ureq::Response> {
        let auth = self.bearer()?;
        let url = self.build_url(path);
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!("{} {}", method, url);

        let request = self
            .agent
            .request(method, &url)
            .set("Authorization", &auth)
            .set("Accept", "application/json");

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - status {}", method, url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::debug!("{} {} - error: {}", method, url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    fn get(&self, path: &str) -> CrmApiResult<ureq::Response> {
        self.send("GET", path, None)
    }

    fn post(&self, path: &str, body: &Value) -> CrmApiResult<ureq::Response> {
        self.send("POST", path, Some(body))
    }

    fn patch(&self, path: &str, body: &Value) -> CrmApiResult<ureq::Response> {
        self.send("PATCH", path, Some(body))
    }

    /// Decode a JSON response body.
    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> CrmApiResult<T> {
        let body = response
            .into_string()
            .map_err(|e| CrmApiError::HttpError(e.to_string()))?;
        serde_json::from_str(&body).map_err(CrmApiError::JsonError)
    }

    /// Map a ureq error to a CrmApiError.
    fn map_error(&self, error: ureq::Error) -> CrmApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let raw = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                // HubSpot error bodies are {"status":"error","message":...}
                let message = serde_json::from_str::<Value>(&raw)
                    .ok()
                    .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                    .unwrap_or(raw);

                match code {
                    401 => CrmApiError::Unauthorized,
                    404 => CrmApiError::NotFound(message),
                    429 => CrmApiError::RateLimitExceeded,
                    _ => CrmApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed => {
                    CrmApiError::HttpError("Connection failed".to_string())
                }
                ureq::ErrorKind::Io => CrmApiError::Timeout,
                _ => CrmApiError::HttpError(transport.to_string()),
            },
        }
    }

    /// Replace the API's 404 message with a description of what was missing.
    fn not_found_as(what: String) -> impl FnOnce(CrmApiError) -> CrmApiError {
        move |e| match e {
            CrmApiError::NotFound(_) => CrmApiError::NotFound(what),
            other => other,
        }
    }

    fn object_path(object_type: &str, id: &str, properties: &[&str]) -> String {
        format!(
            "/crm/v3/objects/{}/{}?properties={}",
            object_type,
            urlencoding::encode(id),
            properties.join(",")
        )
    }

    // ========================= Contact Operations =========================

    /// Get a contact's identity fields (email, first and last name).
    pub fn get_contact(&self, contact_id: &str) -> CrmApiResult<CrmObject> {
        let path = Self::object_path("contacts", contact_id, &CONTACT_PROPERTIES);
        let response = self
            .get(&path)
            .map_err(Self::not_found_as(format!("contact {}", contact_id)))?;
        let contact: CrmObject = Self::read_json(response)?;
        self.metrics.record_contacts_fetched(1);
        Ok(contact)
    }

    /// Search contacts whose `email` equals `email`.
    pub fn search_contacts_by_email(&self, email: &str) -> CrmApiResult<Vec<CrmObject>> {
        let body = json!({
            "filterGroups": [{
                "filters": [{
                    "propertyName": "email",
                    "operator": "EQ",
                    "value": email,
                }]
            }],
            "properties": CONTACT_PROPERTIES,
            "limit": EMAIL_SEARCH_LIMIT,
        });

        let response = self.post("/crm/v3/objects/contacts/search", &body)?;
        let search: SearchResponse = Self::read_json(response)?;
        self.metrics.record_contacts_fetched(search.results.len());
        Ok(search.results)
    }

    /// Create a contact from a property map.
    pub fn create_contact(&self, properties: &Map<String, Value>) -> CrmApiResult<CrmObject> {
        let body = json!({ "properties": properties });
        let response = self.post("/crm/v3/objects/contacts", &body)?;
        let contact: CrmObject = Self::read_json(response)?;
        self.metrics.record_write();
        Ok(contact)
    }

    /// Update the given properties of a contact.
    pub fn update_contact(
        &self,
        contact_id: &str,
        properties: &Map<String, Value>,
    ) -> CrmApiResult<CrmObject> {
        let body = json!({ "properties": properties });
        let path = format!("/crm/v3/objects/contacts/{}", urlencoding::encode(contact_id));
        let response = self
            .patch(&path, &body)
            .map_err(Self::not_found_as(format!("contact {}", contact_id)))?;
        let contact: CrmObject = Self::read_json(response)?;
        self.metrics.record_write();
        Ok(contact)
    }

    // ========================= Deal Operations =========================

    /// Update the given properties of a deal.
    pub fn update_deal(
        &self,
        deal_id: &str,
        properties: &Map<String, Value>,
    ) -> CrmApiResult<CrmObject> {
        let body = json!({ "properties": properties });
        let path = format!("/crm/v3/objects/deals/{}", urlencoding::encode(deal_id));
        let response = self
            .patch(&path, &body)
            .map_err(Self::not_found_as(format!("deal {}", deal_id)))?;
        let deal: CrmObject = Self::read_json(response)?;
        self.metrics.record_write();
        Ok(deal)
    }

    /// List deal pipelines with their stages.
    pub fn get_deal_pipelines(&self) -> CrmApiResult<Vec<Pipeline>> {
        let response = self.get("/crm/v3/pipelines/deals")?;
        let pipelines: PipelinesResponse = Self::read_json(response)?;
        Ok(pipelines.results)
    }

    // ========================= Engagement Operations =========================

    /// Ids of the engagements of `kind` associated with a contact, in API order.
    pub fn get_contact_associations(
        &self,
        contact_id: &str,
        kind: EngagementKind,
    ) -> CrmApiResult<Vec<String>> {
        let path = format!(
            "/crm/v3/objects/contacts/{}/associations/{}",
            urlencoding::encode(contact_id),
            kind.object_type()
        );
        let response = self.get(&path)?;
        let associations: AssociationsResponse = Self::read_json(response)?;
        Ok(associations.into_ids())
    }

    /// Fetch one engagement with the fixed property list of its kind.
    pub fn get_engagement(&self, kind: EngagementKind, id: &str) -> CrmApiResult<CrmObject> {
        let path = Self::object_path(kind.object_type(), id, &kind.properties());
        let response = self
            .get(&path)
            .map_err(Self::not_found_as(format!("{} {}", kind.label().to_lowercase(), id)))?;
        let engagement: CrmObject = Self::read_json(response)?;
        self.metrics.record_engagement_fetched();
        Ok(engagement)
    }

    /// Create a note attached to a contact or deal.
    pub fn create_note(&self, target: &NoteTarget, body: &str) -> CrmApiResult<CrmObject> {
        let request = json!({
            "properties": {
                "hs_note_body": body,
                "hs_timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "associations": [{
                "to": { "id": target.id() },
                "types": [{
                    "associationCategory": "HUBSPOT_DEFINED",
                    "associationTypeId": target.association_type_id(),
                }]
            }]
        });

        let response = self.post("/crm/v3/objects/notes", &request)?;
        let note: CrmObject = Self::read_json(response)?;
        self.metrics.record_write();
        tracing::info!("Created note {} for {:?}", note.id, target);
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = HubSpotClient::with_base_url(
            "https://api.hubapi.com".to_string(),
            Some("token".to_string()),
        );
        assert_eq!(
            client.build_url("/crm/v3/objects/contacts"),
            "https://api.hubapi.com/crm/v3/objects/contacts"
        );
        assert_eq!(
            client.build_url("crm/v3/objects/contacts"),
            "https://api.hubapi.com/crm/v3/objects/contacts"
        );

        let client_with_slash =
            HubSpotClient::with_base_url("https://api.hubapi.com/".to_string(), None);
        assert_eq!(
            client_with_slash.build_url("/crm/v3/pipelines/deals"),
            "https://api.hubapi.com/crm/v3/pipelines/deals"
        );
    }

    #[test]
    fn test_bearer_requires_token() {
        let client = HubSpotClient::with_base_url("https://api.hubapi.com".to_string(), None);
        assert!(matches!(client.bearer(), Err(CrmApiError::MissingCredential)));

        let client = HubSpotClient::with_base_url(
            "https://api.hubapi.com".to_string(),
            Some("pat-123".to_string()),
        );
        assert_eq!(client.bearer().unwrap(), "Bearer pat-123");
    }

    #[test]
    fn test_client_creation_from_config() {
        let config = Config {
            api_base_url: "https://api.hubapi.com".to_string(),
            access_token: Some("pat-123".to_string()),
            ..Config::default()
        };
        let client = HubSpotClient::new(&config);
        assert_eq!(client.base_url, "https://api.hubapi.com");
        assert_eq!(client.access_token.as_deref(), Some("pat-123"));
    }

    #[test]
    fn test_object_path() {
        assert_eq!(
            HubSpotClient::object_path("notes", "77", &["hs_note_body", "hs_createdate"]),
            "/crm/v3/objects/notes/77?properties=hs_note_body,hs_createdate"
        );
    }

    #[test]
    fn test_note_target_association_types() {
        assert_eq!(NoteTarget::Contact("1".into()).association_type_id(), 202);
        assert_eq!(NoteTarget::Deal("1".into()).association_type_id(), 214);
    }

    #[test]
    fn test_not_found_rewrites_only_not_found() {
        let rewrite = HubSpotClient::not_found_as("deal 9".to_string());
        match rewrite(CrmApiError::NotFound("resource not found".into())) {
            CrmApiError::NotFound(msg) => assert_eq!(msg, "deal 9"),
            other => panic!("unexpected {:?}", other),
        }
        let rewrite = HubSpotClient::not_found_as("deal 9".to_string());
        assert!(matches!(rewrite(CrmApiError::Timeout), CrmApiError::Timeout));
    }
}
