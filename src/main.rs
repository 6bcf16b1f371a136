//! HubSpot MCP Server - Main entry point
//!
//! Serves the HubSpot CRM tools over the Model Context Protocol on stdio.

use anyhow::Result;
use hubspot_mcp_server::client::{AsyncHubSpotClient, AsyncHubSpotClientImpl};
use hubspot_mcp_server::repositories::{
    ContactRepository, DealRepository, EngagementRepository, HubSpotContactRepository,
    HubSpotDealRepository, HubSpotEngagementRepository, HubSpotNoteRepository, NoteRepository,
};
use hubspot_mcp_server::{Config, HubSpotClient, HubSpotMcpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration comes first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting HubSpot MCP Server with API URL: {}",
        config.api_base_url
    );
    if !config.has_credentials() {
        warn!("HUBSPOT_ACCESS_TOKEN is not set; every tool call will fail until it is");
    }

    let sync_client = HubSpotClient::new(&config);
    let client =
        Arc::new(AsyncHubSpotClientImpl::new(sync_client)) as Arc<dyn AsyncHubSpotClient>;

    let contact_repo =
        Arc::new(HubSpotContactRepository::new(client.clone())) as Arc<dyn ContactRepository>;
    let engagement_repo = Arc::new(HubSpotEngagementRepository::new(client.clone()))
        as Arc<dyn EngagementRepository>;
    let deal_repo = Arc::new(HubSpotDealRepository::new(client.clone())) as Arc<dyn DealRepository>;
    let note_repo = Arc::new(HubSpotNoteRepository::new(client.clone())) as Arc<dyn NoteRepository>;

    let server = HubSpotMcpServer::new(
        contact_repo,
        engagement_repo,
        deal_repo,
        note_repo,
        config.activity_sample_size,
        Duration::from_secs(config.activity_timeout_secs),
    );

    info!(
        "Activity summary: {} engagements sampled per type, {}s deadline",
        config.activity_sample_size, config.activity_timeout_secs
    );

    info!("Starting MCP server with stdio transport");
    hubspot_mcp_server::server::run_server(server).await?;

    debug!("Metrics: {:?}", client.metrics().summary());
    info!("HubSpot MCP Server shutdown complete");
    Ok(())
}
