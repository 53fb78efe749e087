//! MCP server implementation for Trellis
//!
//! Exposes the six plan operations as MCP tools over stdio. Every tool
//! answers with the operation's result envelope as JSON text; operation
//! failures are flagged as tool errors but still carry the envelope.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};
use trellis_core::OrchestrationTools;

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{
    AddTask, CreatePlan, McpHandlers, McpResult, NextActions, SessionOnly, UpdateTaskStatus,
};

const INSTRUCTIONS: &str = r#"Trellis keeps one active plan per session: a goal broken into prioritized tasks with dependencies.

## Core Concepts
- **Plan**: a goal, optional constraints and a task list; creating a plan replaces the session's previous one
- **Task**: title, optional description, priority (higher first) and `depends_on` ids of earlier tasks
- **Status**: pending, in_progress, done, blocked or failed
- **Actionable**: a pending task whose dependencies are all done

## Workflow
1. `create_plan` with the goal and initial tasks (ids are assigned 1, 2, 3... in order)
2. `next_actions` to receive the highest-priority actionable tasks; they are marked in_progress
3. `update_task_status` with done/failed/blocked and a `result_summary`
4. `summarize_progress` to see counts, completion ratio and problematic tasks
5. `add_task` for work discovered along the way, `reset_plan` to discard the plan

## Sessions
Every tool accepts an optional `session` key. Calls without one share the "default" session.

## Results
Every tool returns a JSON envelope `{operation, result, metadata}`. On failure `result` is null and `metadata.error` explains why; the plan is left unchanged."#;

/// MCP server for Trellis
#[derive(Clone)]
pub struct TrellisMcpServer {
    tools: Arc<Mutex<OrchestrationTools>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TrellisMcpServer {
    /// Create a new Trellis MCP server
    pub fn new(tools: OrchestrationTools) -> Self {
        Self {
            tools: Arc::new(Mutex::new(tools)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.tools.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a new plan for a goal, replacing the session's active plan. Provide the goal (required), optional constraints, optional max_tasks, and an optional ordered list of tasks (title, description, priority, depends_on). Tasks receive ids 1..n in list order and may only depend on earlier tasks. If any task is invalid nothing is created."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "add_task",
        description = "Add a task to the active plan. Requires a title; optional description, priority (default 0, higher runs first) and depends_on (ids of existing tasks). The task starts pending and receives the next sequential id."
    )]
    async fn add_task(&self, params: Parameters<AddTask>) -> McpResult {
        self.handlers().add_task(params).await
    }

    #[tool(
        name = "update_task_status",
        description = "Set a task's status to 'pending', 'in_progress', 'done', 'blocked' or 'failed'. Provide result_summary describing what was accomplished (done) or what went wrong (failed/blocked). Done and failed tasks can only be reopened to pending."
    )]
    async fn update_task_status(&self, params: Parameters<UpdateTaskStatus>) -> McpResult {
        self.handlers().update_task_status(params).await
    }

    #[tool(
        name = "next_actions",
        description = "Return up to max_actions (default 1) actionable tasks: pending tasks whose dependencies are all done, ordered by priority (highest first) then id. By default the returned tasks are marked in_progress; pass mark_in_progress=false to only peek."
    )]
    async fn next_actions(&self, params: Parameters<NextActions>) -> McpResult {
        self.handlers().next_actions(params).await
    }

    #[tool(
        name = "summarize_progress",
        description = "Summarize the active plan: task counts per status, total, done, completion_ratio, the number of actionable tasks, and the blocked or failed tasks with their summaries."
    )]
    async fn summarize_progress(&self, params: Parameters<SessionOnly>) -> McpResult {
        self.handlers().summarize_progress(params).await
    }

    #[tool(
        name = "reset_plan",
        description = "Discard the session's active plan. Always succeeds, also when no plan is active."
    )]
    async fn reset_plan(&self, params: Parameters<SessionOnly>) -> McpResult {
        self.handlers().reset_plan(params).await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TrellisMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "trellis".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: TrellisMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Trellis MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_registers_six_tools() {
        let server = TrellisMcpServer::new(OrchestrationTools::default());
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "add_task",
                "create_plan",
                "next_actions",
                "reset_plan",
                "summarize_progress",
                "update_task_status",
            ]
        );
    }

    #[test]
    fn test_server_info() {
        let server = TrellisMcpServer::new(OrchestrationTools::default());
        let info = server.get_info();
        assert_eq!(info.server_info.name, "trellis");
        assert!(info.instructions.unwrap().contains("next_actions"));
    }
}
