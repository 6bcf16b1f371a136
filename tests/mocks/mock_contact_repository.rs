use async_trait::async_trait;
use hubspot_mcp_server::domain::EmailAddress;
use hubspot_mcp_server::error::{CrmApiError, CrmApiResult};
use hubspot_mcp_server::models::{ContactProperties, CrmObject};
use hubspot_mcp_server::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// easily configured with test data and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<HashMap<String, CrmObject>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_id: Arc<Mutex<u64>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1000)),
            delay: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a contact to the mock repository.
    pub fn add_contact(&self, contact: CrmObject) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id.clone(), contact);
    }

    /// Add a contact built from its identity fields.
    pub fn add(&self, id: &str, first: &str, last: &str, email: &str) {
        self.add_contact(
            CrmObject::new(id)
                .with_property("firstname", first)
                .with_property("lastname", last)
                .with_property("email", email),
        );
    }

    /// Delay every `get` by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn stored(&self, id: &str) -> Option<CrmObject> {
        self.contacts.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.contacts.lock().unwrap().len()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn apply(contact: &mut CrmObject, properties: &ContactProperties) {
        for (key, value) in properties.to_properties() {
            contact.properties.insert(key, value);
        }
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn get(&self, id: &str) -> CrmApiResult<CrmObject> {
        self.track_call("get");

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let contacts = self.contacts.lock().unwrap();
        contacts
            .get(id)
            .cloned()
            .ok_or_else(|| CrmApiError::NotFound(format!("contact {}", id)))
    }

    async fn search_by_email(&self, email: &EmailAddress) -> CrmApiResult<Vec<CrmObject>> {
        self.track_call("search_by_email");

        let contacts = self.contacts.lock().unwrap();
        let mut matches: Vec<CrmObject> = contacts
            .values()
            .filter(|c| {
                c.property("email")
                    .map(|e| e.eq_ignore_ascii_case(email.as_str()))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches)
    }

    async fn create(&self, properties: &ContactProperties) -> CrmApiResult<CrmObject> {
        self.track_call("create");

        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            next.to_string()
        };

        let mut contact = CrmObject::new(id.clone());
        Self::apply(&mut contact, properties);
        self.contacts.lock().unwrap().insert(id, contact.clone());
        Ok(contact)
    }

    async fn update(&self, id: &str, properties: &ContactProperties) -> CrmApiResult<CrmObject> {
        self.track_call("update");

        let mut contacts = self.contacts.lock().unwrap();
        let contact = contacts
            .get_mut(id)
            .ok_or_else(|| CrmApiError::NotFound(format!("contact {}", id)))?;
        Self::apply(contact, properties);
        Ok(contact.clone())
    }
}
