use crate::client::{AsyncHubSpotClient, NoteTarget};
use crate::error::CrmApiResult;
use crate::models::CrmObject;
use crate::repositories::traits::NoteRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Note repository implementation using the HubSpot API client.
pub struct HubSpotNoteRepository {
    client: Arc<dyn AsyncHubSpotClient>,
}

impl HubSpotNoteRepository {
    pub fn new(client: Arc<dyn AsyncHubSpotClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NoteRepository for HubSpotNoteRepository {
    async fn create(&self, target: &NoteTarget, body: &str) -> CrmApiResult<CrmObject> {
        self.client.create_note(target, body).await
    }
}
