//! Error handling utilities for MCP server

use rmcp::ErrorData;
use trellis_core::PlanError;

/// Helper to convert plan errors to MCP errors
///
/// Operation failures travel inside envelopes; only failures of the server
/// itself (such as serializing a result) become protocol errors.
pub fn to_mcp_error(message: &str, error: &PlanError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}
