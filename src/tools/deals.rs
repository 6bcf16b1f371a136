//! Deal tools: stage updates and pipeline lookup.

use super::contacts::non_blank;
use crate::client::NoteTarget;
use crate::domain::RecordId;
use crate::error::{CrmApiError, CrmApiResult};
use crate::models::{CrmObject, Pipeline};
use crate::repositories::{DealRepository, NoteRepository};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of [`DealTools::update_deal_stage`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealStageUpdate {
    pub deal: CrmObject,

    /// Present only when notes were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_logged: Option<bool>,
}

pub struct DealTools {
    deal_repo: Arc<dyn DealRepository>,
    note_repo: Arc<dyn NoteRepository>,
}

impl DealTools {
    pub fn new(deal_repo: Arc<dyn DealRepository>, note_repo: Arc<dyn NoteRepository>) -> Self {
        Self {
            deal_repo,
            note_repo,
        }
    }

    /// Move a deal to `stage`, then log `notes` against it when given.
    ///
    /// A failed note does not undo or fail the stage change; it is reported
    /// through `note_logged`.
    pub async fn update_deal_stage(
        &self,
        deal_id: Option<&str>,
        stage: Option<&str>,
        notes: Option<&str>,
    ) -> CrmApiResult<DealStageUpdate> {
        let deal_id = RecordId::require("dealId", deal_id)?;
        let stage = non_blank(stage)
            .ok_or_else(|| CrmApiError::InvalidInput("dealstage is required".to_string()))?;

        let deal = self.deal_repo.update_stage(deal_id.as_str(), stage).await?;
        info!("Moved deal {} to stage {}", deal_id, stage);

        let note_logged = match non_blank(notes) {
            Some(notes) => {
                let target = NoteTarget::Deal(deal_id.to_string());
                match self.note_repo.create(&target, notes).await {
                    Ok(_) => Some(true),
                    Err(e) => {
                        warn!("Failed to log note for deal {}: {}", deal_id, e);
                        Some(false)
                    }
                }
            }
            None => None,
        };

        Ok(DealStageUpdate { deal, note_logged })
    }

    /// All deal pipelines ordered by display order, stages likewise.
    pub async fn pipelines(&self) -> CrmApiResult<Vec<Pipeline>> {
        let mut pipelines = self.deal_repo.pipelines().await?;
        pipelines.sort_by_key(|p| p.display_order);
        for pipeline in &mut pipelines {
            pipeline.sort_stages();
        }
        Ok(pipelines)
    }
}
