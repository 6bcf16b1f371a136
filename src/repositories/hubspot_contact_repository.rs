use crate::client::AsyncHubSpotClient;
use crate::domain::EmailAddress;
use crate::error::CrmApiResult;
use crate::models::{ContactProperties, CrmObject};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Contact repository implementation using the HubSpot API client.
///
/// This repository delegates all operations to the AsyncHubSpotClient,
/// providing a clean abstraction layer between the tools and the
/// underlying HTTP client.
pub struct HubSpotContactRepository {
    client: Arc<dyn AsyncHubSpotClient>,
}

impl HubSpotContactRepository {
    pub fn new(client: Arc<dyn AsyncHubSpotClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactRepository for HubSpotContactRepository {
    async fn get(&self, id: &str) -> CrmApiResult<CrmObject> {
        self.client.get_contact(id).await
    }

    async fn search_by_email(&self, email: &EmailAddress) -> CrmApiResult<Vec<CrmObject>> {
        self.client.search_contacts_by_email(email.as_str()).await
    }

    async fn create(&self, properties: &ContactProperties) -> CrmApiResult<CrmObject> {
        self.client.create_contact(&properties.to_properties()).await
    }

    async fn update(&self, id: &str, properties: &ContactProperties) -> CrmApiResult<CrmObject> {
        self.client
            .update_contact(id, &properties.to_properties())
            .await
    }
}
