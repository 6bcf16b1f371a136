//! MCP server implementation for HubSpot CRM.
//!
//! This module provides the MCP protocol server that exposes the CRM tools
//! to AI assistants through the Model Context Protocol.

pub mod envelope;
pub mod handlers;

pub use handlers::HubSpotMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the HubSpot MCP server with stdio transport.
///
/// Communicates via stdin/stdout using the MCP protocol and returns once the
/// client disconnects.
pub async fn run_server(server: HubSpotMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
