//! CRM tools exposed by the HubSpot MCP server.
//!
//! - **Activity**: per-contact engagement summary across all engagement kinds
//! - **Report**: plain-text rendering of an activity summary
//! - **Contacts**: create and update contacts, including from a chat
//! - **Deals**: stage updates and pipeline lookup

pub mod activity;
pub mod contacts;
pub mod deals;
pub mod report;

pub use activity::{ContactActivity, ContactActivityTools, DEFAULT_DEADLINE, DEFAULT_SAMPLE_SIZE};
pub use contacts::{ChatContactOutcome, ContactInput, ContactTools};
pub use deals::{DealStageUpdate, DealTools};
pub use report::render as render_activity_report;
