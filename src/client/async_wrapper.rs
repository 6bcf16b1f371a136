//! Async wrapper around the synchronous HubSpotClient.
//!
//! This module provides an async interface to the synchronous HubSpotClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{HubSpotClient, NoteTarget};
use crate::error::{CrmApiError, CrmApiResult};
use crate::metrics::Metrics;
use crate::models::{CrmObject, EngagementKind, Pipeline};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Async client trait for HubSpot CRM operations.
///
/// This trait provides async versions of the HubSpotClient methods,
/// internally using `tokio::task::spawn_blocking` to avoid
/// blocking the async runtime with synchronous HTTP calls.
#[async_trait]
pub trait AsyncHubSpotClient: Send + Sync {
    async fn get_contact(&self, id: &str) -> CrmApiResult<CrmObject>;
    async fn search_contacts_by_email(&self, email: &str) -> CrmApiResult<Vec<CrmObject>>;
    async fn create_contact(&self, properties: &Map<String, Value>) -> CrmApiResult<CrmObject>;
    async fn update_contact(
        &self,
        id: &str,
        properties: &Map<String, Value>,
    ) -> CrmApiResult<CrmObject>;

    async fn update_deal(&self, id: &str, properties: &Map<String, Value>)
        -> CrmApiResult<CrmObject>;
    async fn get_deal_pipelines(&self) -> CrmApiResult<Vec<Pipeline>>;

    async fn get_contact_associations(
        &self,
        contact_id: &str,
        kind: EngagementKind,
    ) -> CrmApiResult<Vec<String>>;
    async fn get_engagement(&self, kind: EngagementKind, id: &str) -> CrmApiResult<CrmObject>;
    async fn create_note(&self, target: &NoteTarget, body: &str) -> CrmApiResult<CrmObject>;

    /// Metrics of the underlying client.
    fn metrics(&self) -> Metrics;
}

/// Async wrapper around synchronous HubSpotClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncHubSpotClientImpl {
    client: Arc<HubSpotClient>,
}

impl AsyncHubSpotClientImpl {
    pub fn new(client: HubSpotClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run a client call on the blocking pool.
    async fn blocking<T, F>(&self, call: F) -> CrmApiResult<T>
    where
        F: FnOnce(&HubSpotClient) -> CrmApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || call(&client))
            .await
            .map_err(|e| CrmApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncHubSpotClient for AsyncHubSpotClientImpl {
    async fn get_contact(&self, id: &str) -> CrmApiResult<CrmObject> {
        let id = id.to_string();
        self.blocking(move |c| c.get_contact(&id)).await
    }

    async fn search_contacts_by_email(&self, email: &str) -> CrmApiResult<Vec<CrmObject>> {
        let email = email.to_string();
        self.blocking(move |c| c.search_contacts_by_email(&email))
            .await
    }

    async fn create_contact(&self, properties: &Map<String, Value>) -> CrmApiResult<CrmObject> {
        let properties = properties.clone();
        self.blocking(move |c| c.create_contact(&properties)).await
    }

    async fn update_contact(
        &self,
        id: &str,
        properties: &Map<String, Value>,
    ) -> CrmApiResult<CrmObject> {
        let id = id.to_string();
        let properties = properties.clone();
        self.blocking(move |c| c.update_contact(&id, &properties))
            .await
    }

    async fn update_deal(
        &self,
        id: &str,
        properties: &Map<String, Value>,
    ) -> CrmApiResult<CrmObject> {
        let id = id.to_string();
        let properties = properties.clone();
        self.blocking(move |c| c.update_deal(&id, &properties)).await
    }

    async fn get_deal_pipelines(&self) -> CrmApiResult<Vec<Pipeline>> {
        self.blocking(|c| c.get_deal_pipelines()).await
    }

    async fn get_contact_associations(
        &self,
        contact_id: &str,
        kind: EngagementKind,
    ) -> CrmApiResult<Vec<String>> {
        let contact_id = contact_id.to_string();
        self.blocking(move |c| c.get_contact_associations(&contact_id, kind))
            .await
    }

    async fn get_engagement(&self, kind: EngagementKind, id: &str) -> CrmApiResult<CrmObject> {
        let id = id.to_string();
        self.blocking(move |c| c.get_engagement(kind, &id)).await
    }

    async fn create_note(&self, target: &NoteTarget, body: &str) -> CrmApiResult<CrmObject> {
        let target = target.clone();
        let body = body.to_string();
        self.blocking(move |c| c.create_note(&target, &body)).await
    }

    fn metrics(&self) -> Metrics {
        self.client.metrics().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_fails_without_network() {
        // Port 9 (discard) is never contacted: the token check comes first.
        let client = HubSpotClient::with_base_url("http://127.0.0.1:9".to_string(), None);
        let async_client = AsyncHubSpotClientImpl::new(client);

        let result = async_client.get_contact("42").await;
        assert!(matches!(result, Err(CrmApiError::MissingCredential)));
        assert_eq!(async_client.metrics().http_requests_total(), 0);
    }
}
