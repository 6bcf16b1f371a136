//! HubSpot MCP Server - a Model Context Protocol server exposing HubSpot CRM
//! operations as tools for AI assistants.
//!
//! # Architecture
//!
//! - **domain**: validated value objects for ids, emails and phone numbers
//! - **models**: CRM objects, engagements, activity summaries and pipelines
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the HubSpot CRM v3 API and its async wrapper
//! - **repositories**: async traits over the client, mockable in tests
//! - **tools**: activity summary, report rendering, contact and deal tools
//! - **metrics**: in-process request and record counters
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod tools;

pub use client::HubSpotClient;
pub use config::Config;
pub use error::{ConfigError, CrmApiError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{ActivitySummary, CrmObject, EngagementKind, EngagementRecord, Pipeline};
pub use server::HubSpotMcpServer;
pub use tools::{ContactActivityTools, ContactTools, DealTools};
