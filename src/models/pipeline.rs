//! Deal pipelines and their stages.

use serde::{Deserialize, Serialize};

/// Response of `GET /crm/v3/pipelines/deals`.
#[derive(Debug, Deserialize)]
pub struct PipelinesResponse {
    #[serde(default)]
    pub results: Vec<Pipeline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: String,
    pub label: String,

    #[serde(default)]
    pub display_order: i64,

    #[serde(default)]
    pub stages: Vec<PipelineStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    /// Internal stage id, the value `dealstage` takes
    pub id: String,
    pub label: String,

    #[serde(default)]
    pub display_order: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StageMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageMetadata {
    /// Win probability as sent by HubSpot, e.g. `"0.2"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<String>,
}

impl Pipeline {
    /// Sort stages by their board position.
    pub fn sort_stages(&mut self) {
        self.stages.sort_by_key(|s| s.display_order);
    }

    /// Whether `stage_id` belongs to this pipeline.
    pub fn has_stage(&self, stage_id: &str) -> bool {
        self.stages.iter().any(|s| s.id == stage_id)
    }
}
