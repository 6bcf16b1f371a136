use async_trait::async_trait;
use hubspot_mcp_server::error::{CrmApiError, CrmApiResult};
use hubspot_mcp_server::models::{CrmObject, Pipeline};
use hubspot_mcp_server::repositories::DealRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock deal repository holding deals by id and a fixed pipeline list.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDealRepository {
    deals: Arc<Mutex<HashMap<String, CrmObject>>>,
    pipelines: Arc<Mutex<Vec<Pipeline>>>,
}

#[allow(dead_code)]
impl MockDealRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_deal(&self, id: &str, stage: &str) {
        self.deals.lock().unwrap().insert(
            id.to_string(),
            CrmObject::new(id).with_property("dealstage", stage),
        );
    }

    pub fn set_pipelines(&self, pipelines: Vec<Pipeline>) {
        *self.pipelines.lock().unwrap() = pipelines;
    }

    pub fn stage_of(&self, id: &str) -> Option<String> {
        self.deals
            .lock()
            .unwrap()
            .get(id)
            .and_then(|d| d.property("dealstage").map(str::to_string))
    }
}

#[async_trait]
impl DealRepository for MockDealRepository {
    async fn update_stage(&self, deal_id: &str, stage: &str) -> CrmApiResult<CrmObject> {
        let mut deals = self.deals.lock().unwrap();
        let deal = deals
            .get_mut(deal_id)
            .ok_or_else(|| CrmApiError::NotFound(format!("deal {}", deal_id)))?;
        *deal = deal.clone().with_property("dealstage", stage);
        Ok(deal.clone())
    }

    async fn pipelines(&self) -> CrmApiResult<Vec<Pipeline>> {
        Ok(self.pipelines.lock().unwrap().clone())
    }
}
