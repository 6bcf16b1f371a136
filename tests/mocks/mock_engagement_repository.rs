use async_trait::async_trait;
use hubspot_mcp_server::error::{CrmApiError, CrmApiResult};
use hubspot_mcp_server::models::{CrmObject, EngagementKind};
use hubspot_mcp_server::repositories::EngagementRepository;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock engagement repository.
///
/// Associations are stored per contact and kind in insertion order. Kinds
/// and record ids can be marked as failing, and an artificial delay can be
/// added to association lookups.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockEngagementRepository {
    associations: Arc<Mutex<HashMap<(String, EngagementKind), Vec<String>>>>,
    records: Arc<Mutex<HashMap<(EngagementKind, String), CrmObject>>>,
    failing_kinds: Arc<Mutex<HashSet<EngagementKind>>>,
    failing_records: Arc<Mutex<HashSet<String>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    detail_calls: Arc<Mutex<Vec<(EngagementKind, String)>>>,
}

#[allow(dead_code)]
impl MockEngagementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `record` with the contact and store it for detail lookups.
    pub fn add(&self, contact_id: &str, kind: EngagementKind, record: CrmObject) {
        self.associations
            .lock()
            .unwrap()
            .entry((contact_id.to_string(), kind))
            .or_default()
            .push(record.id.clone());
        self.records
            .lock()
            .unwrap()
            .insert((kind, record.id.clone()), record);
    }

    /// Associate an id without a stored record, so its detail lookup misses.
    pub fn add_dangling(&self, contact_id: &str, kind: EngagementKind, id: &str) {
        self.associations
            .lock()
            .unwrap()
            .entry((contact_id.to_string(), kind))
            .or_default()
            .push(id.to_string());
    }

    pub fn fail_kind(&self, kind: EngagementKind) {
        self.failing_kinds.lock().unwrap().insert(kind);
    }

    pub fn fail_record(&self, id: &str) {
        self.failing_records.lock().unwrap().insert(id.to_string());
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Detail lookups made so far, in call order.
    pub fn detail_calls(&self) -> Vec<(EngagementKind, String)> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EngagementRepository for MockEngagementRepository {
    async fn associations(
        &self,
        contact_id: &str,
        kind: EngagementKind,
    ) -> CrmApiResult<Vec<String>> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_kinds.lock().unwrap().contains(&kind) {
            return Err(CrmApiError::ApiError {
                status: 502,
                message: format!("{} association lookup failed", kind),
            });
        }

        Ok(self
            .associations
            .lock()
            .unwrap()
            .get(&(contact_id.to_string(), kind))
            .cloned()
            .unwrap_or_default())
    }

    async fn engagement(&self, kind: EngagementKind, id: &str) -> CrmApiResult<CrmObject> {
        self.detail_calls
            .lock()
            .unwrap()
            .push((kind, id.to_string()));

        if self.failing_records.lock().unwrap().contains(id) {
            return Err(CrmApiError::Timeout);
        }

        self.records
            .lock()
            .unwrap()
            .get(&(kind, id.to_string()))
            .cloned()
            .ok_or_else(|| CrmApiError::NotFound(format!("{} {}", kind, id)))
    }
}
