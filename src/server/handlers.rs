//! MCP tool handlers for the HubSpot server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Every parameter is optional at the schema level so that missing fields come
//! back as an `invalid_input` envelope instead of a protocol error.

use super::envelope::respond;
use crate::repositories::{
    ContactRepository, DealRepository, EngagementRepository, NoteRepository,
};
use crate::tools::{
    render_activity_report, ContactActivityTools, ContactInput, ContactTools, DealTools,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// The HubSpot MCP server that exposes CRM tools to an AI agent.
#[derive(Clone)]
pub struct HubSpotMcpServer {
    activity_tools: Arc<ContactActivityTools>,
    contact_tools: Arc<ContactTools>,
    deal_tools: Arc<DealTools>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for HubSpotMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "hubspot-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for HubSpot CRM - create and update contacts, move deals between pipeline stages, and summarize a contact's calls, emails, notes, tasks and meetings.".into()),
        }
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ContactFieldsParams {
    #[serde(default)]
    email: Option<String>,
    /// Full name; the first word becomes the first name
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    company: Option<String>,
}

impl From<ContactFieldsParams> for ContactInput {
    fn from(p: ContactFieldsParams) -> Self {
        ContactInput {
            email: p.email,
            name: p.name,
            phone: p.phone,
            company: p.company,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct UpdateContactParams {
    /// Contact to update; looked up by email when absent
    #[serde(default)]
    contact_id: Option<String>,
    #[serde(flatten)]
    fields: ContactFieldsParams,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct UpdateDealStageParams {
    #[serde(default)]
    deal_id: Option<String>,
    /// Internal id of the target stage
    #[serde(default)]
    dealstage: Option<String>,
    /// Optional note logged against the deal
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct SummarizeActivityParams {
    #[serde(default)]
    contact_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct CreateFromChatParams {
    #[serde(flatten)]
    fields: ContactFieldsParams,
    /// Summary of the conversation, logged as a note on a new contact
    #[serde(default)]
    chat_summary: Option<String>,
}

#[tool_router]
impl HubSpotMcpServer {
    /// Create a new HubSpot MCP server.
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        engagement_repo: Arc<dyn EngagementRepository>,
        deal_repo: Arc<dyn DealRepository>,
        note_repo: Arc<dyn NoteRepository>,
        activity_sample_size: usize,
        activity_deadline: Duration,
    ) -> Self {
        let activity_tools = ContactActivityTools::new(contact_repo.clone(), engagement_repo)
            .with_sample_size(activity_sample_size)
            .with_deadline(activity_deadline);

        let contact_tools = ContactTools::new(contact_repo, note_repo.clone());
        let deal_tools = DealTools::new(deal_repo, note_repo);

        Self {
            activity_tools: Arc::new(activity_tools),
            contact_tools: Arc::new(contact_tools),
            deal_tools: Arc::new(deal_tools),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Create a HubSpot contact. Requires email; name, phone and company are optional. The name is split into first and last name on the first space."
    )]
    async fn create_contact(
        &self,
        params: Parameters<ContactFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        let input = ContactInput::from(params.0);
        let result = self
            .contact_tools
            .create_contact(&input)
            .await
            .map(|contact| json!({ "contact": contact }));
        respond("create_contact", result)
    }

    #[tool(
        description = "Update a HubSpot contact's name, phone, company or email. Identify the contact by contactId, or by email when no contactId is given."
    )]
    async fn update_contact(
        &self,
        params: Parameters<UpdateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let input = ContactInput::from(params.fields);
        let result = self
            .contact_tools
            .update_contact(params.contact_id.as_deref(), &input)
            .await
            .map(|contact| json!({ "contact": contact }));
        respond("update_contact", result)
    }

    #[tool(
        description = "Move a deal to another pipeline stage (dealstage is the internal stage id, see get_deal_pipelines). Optionally logs notes against the deal."
    )]
    async fn update_deal_stage(
        &self,
        params: Parameters<UpdateDealStageParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let result = self
            .deal_tools
            .update_deal_stage(
                params.deal_id.as_deref(),
                params.dealstage.as_deref(),
                params.notes.as_deref(),
            )
            .await;
        respond("update_deal_stage", result)
    }

    #[tool(description = "List deal pipelines with their stages in board order.")]
    async fn get_deal_pipelines(&self) -> Result<CallToolResult, McpError> {
        let result = self
            .deal_tools
            .pipelines()
            .await
            .map(|pipelines| json!({ "pipelines": pipelines }));
        respond("get_deal_pipelines", result)
    }

    #[tool(
        description = "Summarize a contact's activity: counts of calls, emails, notes, tasks and meetings, the most recent engagement, a sample of recent items per type and a readable report. Identify the contact by contactId or email."
    )]
    async fn summarize_contact_activity(
        &self,
        params: Parameters<SummarizeActivityParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let result = self
            .activity_tools
            .summarize_for(params.contact_id.as_deref(), params.email.as_deref())
            .await
            .map(|activity| {
                let report = render_activity_report(
                    &activity.summary,
                    &activity.contact.name,
                    activity.contact.email.as_deref(),
                );
                json!({
                    "contact": activity.contact,
                    "summary": activity.summary,
                    "report": report,
                })
            });
        respond("summarize_contact_activity", result)
    }

    #[tool(
        description = "Create a contact captured during a chat unless one with the same email already exists. A chatSummary is logged as a note on the new contact."
    )]
    async fn create_contact_from_chat(
        &self,
        params: Parameters<CreateFromChatParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let chat_summary = params.chat_summary;
        let input = ContactInput::from(params.fields);
        let result = self
            .contact_tools
            .create_from_chat(&input, chat_summary.as_deref())
            .await;
        respond("create_contact_from_chat", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AsyncHubSpotClient, AsyncHubSpotClientImpl};
    use crate::repositories::{
        HubSpotContactRepository, HubSpotDealRepository, HubSpotEngagementRepository,
        HubSpotNoteRepository,
    };
    use crate::HubSpotClient;
    use serde_json::Value;

    fn tokenless_server() -> (HubSpotMcpServer, Arc<dyn AsyncHubSpotClient>) {
        // Port 9 (discard) is never contacted without a token.
        let client = Arc::new(AsyncHubSpotClientImpl::new(HubSpotClient::with_base_url(
            "http://127.0.0.1:9".to_string(),
            None,
        ))) as Arc<dyn AsyncHubSpotClient>;

        let server = HubSpotMcpServer::new(
            Arc::new(HubSpotContactRepository::new(client.clone())),
            Arc::new(HubSpotEngagementRepository::new(client.clone())),
            Arc::new(HubSpotDealRepository::new(client.clone())),
            Arc::new(HubSpotNoteRepository::new(client.clone())),
            5,
            Duration::from_secs(5),
        );
        (server, client)
    }

    fn body(result: &CallToolResult) -> Value {
        let text = result.content[0]
            .raw
            .as_text()
            .map(|t| t.text.clone())
            .unwrap_or_default();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_all_tools_registered() {
        let mut names: Vec<String> = HubSpotMcpServer::tool_router()
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "create_contact",
                "create_contact_from_chat",
                "get_deal_pipelines",
                "summarize_contact_activity",
                "update_contact",
                "update_deal_stage",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_credential_envelope() {
        let (server, client) = tokenless_server();

        let result = server
            .summarize_contact_activity(Parameters(SummarizeActivityParams {
                contact_id: Some("51".to_string()),
                email: None,
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        let body = body(&result);
        assert_eq!(body["ok"], false);
        assert_eq!(
            body["error"],
            "Missing HubSpot access token (set HUBSPOT_ACCESS_TOKEN)"
        );
        assert_eq!(client.metrics().http_requests_total(), 0);
    }

    #[tokio::test]
    async fn test_invalid_input_envelope() {
        let (server, _client) = tokenless_server();

        let result = server
            .create_contact(Parameters(ContactFieldsParams {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();

        let body = body(&result);
        assert_eq!(body["ok"], false);
        assert_eq!(body["errorKind"], "invalid_input");
        assert_eq!(body["error"], "Invalid input: email is required");
    }

    #[test]
    fn test_params_accept_camel_case() {
        let params: UpdateContactParams = serde_json::from_value(serde_json::json!({
            "contactId": "51",
            "company": "Acme"
        }))
        .unwrap();
        assert_eq!(params.contact_id.as_deref(), Some("51"));
        assert_eq!(params.fields.company.as_deref(), Some("Acme"));

        let params: CreateFromChatParams = serde_json::from_value(serde_json::json!({
            "email": "lead@example.com",
            "chatSummary": "Wants a demo"
        }))
        .unwrap();
        assert_eq!(params.fields.email.as_deref(), Some("lead@example.com"));
        assert_eq!(params.chat_summary.as_deref(), Some("Wants a demo"));
    }

    #[test]
    fn test_server_info() {
        let (server, _client) = tokenless_server();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "hubspot-mcp-server");
        assert!(info.capabilities.tools.is_some());
    }
}
