use crate::client::AsyncHubSpotClient;
use crate::error::CrmApiResult;
use crate::models::{CrmObject, EngagementKind};
use crate::repositories::traits::EngagementRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Engagement repository backed by the HubSpot associations and object APIs.
pub struct HubSpotEngagementRepository {
    client: Arc<dyn AsyncHubSpotClient>,
}

impl HubSpotEngagementRepository {
    pub fn new(client: Arc<dyn AsyncHubSpotClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EngagementRepository for HubSpotEngagementRepository {
    async fn associations(
        &self,
        contact_id: &str,
        kind: EngagementKind,
    ) -> CrmApiResult<Vec<String>> {
        self.client.get_contact_associations(contact_id, kind).await
    }

    async fn engagement(&self, kind: EngagementKind, id: &str) -> CrmApiResult<CrmObject> {
        self.client.get_engagement(kind, id).await
    }
}
