use async_trait::async_trait;
use hubspot_mcp_server::client::NoteTarget;
use hubspot_mcp_server::error::{CrmApiError, CrmApiResult};
use hubspot_mcp_server::models::CrmObject;
use hubspot_mcp_server::repositories::NoteRepository;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock note repository recording every note it is asked to create.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockNoteRepository {
    notes: Arc<Mutex<Vec<(NoteTarget, String)>>>,
    fail: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent create fail with a remote error.
    pub fn fail_creates(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn notes(&self) -> Vec<(NoteTarget, String)> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn create(&self, target: &NoteTarget, body: &str) -> CrmApiResult<CrmObject> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CrmApiError::ApiError {
                status: 500,
                message: "note service unavailable".to_string(),
            });
        }

        let mut notes = self.notes.lock().unwrap();
        notes.push((target.clone(), body.to_string()));
        Ok(CrmObject::new(format!("note-{}", notes.len())).with_property("hs_note_body", body))
    }
}
