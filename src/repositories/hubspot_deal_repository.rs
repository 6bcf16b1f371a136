use crate::client::AsyncHubSpotClient;
use crate::error::CrmApiResult;
use crate::models::{CrmObject, Pipeline};
use crate::repositories::traits::DealRepository;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Deal repository implementation using the HubSpot API client.
pub struct HubSpotDealRepository {
    client: Arc<dyn AsyncHubSpotClient>,
}

impl HubSpotDealRepository {
    pub fn new(client: Arc<dyn AsyncHubSpotClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DealRepository for HubSpotDealRepository {
    async fn update_stage(&self, deal_id: &str, stage: &str) -> CrmApiResult<CrmObject> {
        let mut properties = Map::new();
        properties.insert("dealstage".to_string(), Value::String(stage.to_string()));
        self.client.update_deal(deal_id, &properties).await
    }

    async fn pipelines(&self) -> CrmApiResult<Vec<Pipeline>> {
        self.client.get_deal_pipelines().await
    }
}
