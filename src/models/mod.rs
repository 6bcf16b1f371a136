//! Data models for HubSpot CRM entities.
//!
//! Raw objects as the CRM returns them, the normalized engagement shapes the
//! activity summary is built from, and the contact/pipeline views the tools
//! report back to the agent.

pub mod activity;
pub mod contact;
pub mod crm_object;
pub mod engagement;
pub mod pipeline;

pub use activity::{
    parse_timestamp, ActivitySummary, EngagementSummary, MostRecentEngagement, TimelineItem,
    NO_ACTIVITY,
};
pub use contact::{split_name, ContactProperties, ContactRef, CONTACT_PROPERTIES};
pub use crm_object::{AssociationsResponse, CrmObject, SearchResponse};
pub use engagement::{EngagementKind, EngagementRecord};
pub use pipeline::{Pipeline, PipelineStage, PipelinesResponse};
