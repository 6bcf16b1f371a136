//! Uniform tool result envelope.
//!
//! Success: `{"ok": true, ...data}`. Failure: `{"ok": false, "error": message,
//! "errorKind": kind}`, sent as an MCP tool error so the agent sees it as a
//! failed call rather than a protocol fault.

use crate::error::{CrmApiError, CrmApiResult};
use rmcp::model::{CallToolResult, Content, ErrorCode};
use rmcp::ErrorData as McpError;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::borrow::Cow;
use tracing::warn;

/// Envelope body for successful data. Non-object data goes under `data`.
pub fn success_value<T: Serialize>(data: &T) -> serde_json::Result<Value> {
    let mut body = Map::new();
    body.insert("ok".to_string(), Value::Bool(true));

    match serde_json::to_value(data)? {
        Value::Object(fields) => body.extend(fields),
        Value::Null => {}
        other => {
            body.insert("data".to_string(), other);
        }
    }

    Ok(Value::Object(body))
}

/// Envelope body for a failed tool call.
pub fn failure_value(err: &CrmApiError) -> Value {
    json!({
        "ok": false,
        "error": err.to_string(),
        "errorKind": err.kind(),
    })
}

/// Render a tool outcome as a `CallToolResult`.
pub fn respond<T: Serialize>(tool: &str, result: CrmApiResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(data) => {
            let body = success_value(&data).map_err(to_mcp_error)?;
            Ok(CallToolResult::success(vec![Content::text(
                serde_json::to_string_pretty(&body).map_err(to_mcp_error)?,
            )]))
        }
        Err(e) => {
            warn!("Tool {} failed ({}): {}", tool, e.kind(), e);
            let body = failure_value(&e);
            Ok(CallToolResult::error(vec![Content::text(
                serde_json::to_string_pretty(&body).map_err(to_mcp_error)?,
            )]))
        }
    }
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}
