//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;
use trellis_core::{params as core, Envelope, OrchestrationTools};

use super::{errors::to_mcp_error, prompts::prompt_templates};

/// Generic MCP wrapper for core parameter types
///
/// Adds JSON deserialization and schema generation on top of the core
/// parameter types without putting MCP concerns into the core crate.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn from(params: T) -> Self {
        Self(params)
    }
}

// Every tool takes its operation parameters plus an optional session key
pub type CreatePlan = McpParams<core::Scoped<core::CreatePlan>>;
pub type AddTask = McpParams<core::Scoped<core::AddTask>>;
pub type UpdateTaskStatus = McpParams<core::Scoped<core::UpdateTaskStatus>>;
pub type NextActions = McpParams<core::Scoped<core::NextActions>>;
pub type SessionOnly = McpParams<core::Scoped<core::NoParams>>;

pub type McpResult = Result<CallToolResult, McpError>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    tools: Arc<Mutex<OrchestrationTools>>,
}

impl McpHandlers {
    pub fn new(tools: Arc<Mutex<OrchestrationTools>>) -> Self {
        Self { tools }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {params:?}");
        let envelope = self.tools.lock().await.create_plan(params.as_ref());
        envelope_result(&envelope)
    }

    pub async fn add_task(&self, Parameters(params): Parameters<AddTask>) -> McpResult {
        debug!("add_task: {params:?}");
        let envelope = self.tools.lock().await.add_task(params.as_ref());
        envelope_result(&envelope)
    }

    pub async fn update_task_status(
        &self,
        Parameters(params): Parameters<UpdateTaskStatus>,
    ) -> McpResult {
        debug!("update_task_status: {params:?}");
        let envelope = self.tools.lock().await.update_task_status(params.as_ref());
        envelope_result(&envelope)
    }

    pub async fn next_actions(&self, Parameters(params): Parameters<NextActions>) -> McpResult {
        debug!("next_actions: {params:?}");
        let envelope = self.tools.lock().await.next_actions(params.as_ref());
        envelope_result(&envelope)
    }

    pub async fn summarize_progress(
        &self,
        Parameters(params): Parameters<SessionOnly>,
    ) -> McpResult {
        debug!("summarize_progress: {params:?}");
        let envelope = self.tools.lock().await.summarize_progress(params.as_ref());
        envelope_result(&envelope)
    }

    pub async fn reset_plan(&self, Parameters(params): Parameters<SessionOnly>) -> McpResult {
        debug!("reset_plan: {params:?}");
        let envelope = self.tools.lock().await.reset_plan(params.as_ref());
        envelope_result(&envelope)
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: list_prompt_definitions(),
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);
        render_prompt(&request)
    }
}

/// Tool result carrying the envelope JSON.
///
/// Failed operations are still answered (the envelope holds the error) but
/// flagged with `is_error` so clients can tell them apart.
pub fn envelope_result(envelope: &Envelope) -> McpResult {
    let json = envelope
        .to_json()
        .map_err(|e| to_mcp_error("Failed to serialize result", &e))?;
    let content = vec![Content::text(json)];
    if envelope.is_ok() {
        Ok(CallToolResult::success(content))
    } else {
        Ok(CallToolResult::error(content))
    }
}

fn list_prompt_definitions() -> Vec<Prompt> {
    prompt_templates()
        .iter()
        .map(|template| {
            Prompt::new(
                &template.name,
                Some(&template.description),
                Some(
                    template
                        .arguments
                        .iter()
                        .map(|arg| PromptArgument {
                            name: arg.name.clone(),
                            description: Some(arg.description.clone()),
                            required: Some(arg.required),
                        })
                        .collect(),
                ),
            )
        })
        .collect()
}

fn render_prompt(request: &GetPromptRequestParam) -> Result<GetPromptResult, McpError> {
    let template = prompt_templates()
        .iter()
        .find(|t| t.name == request.name)
        .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

    let mut prompt_text = template.template.clone();
    for arg_def in &template.arguments {
        let value = request
            .arguments
            .as_ref()
            .and_then(|args| args.get(&arg_def.name));
        match value.map(|v| v.as_str()) {
            Some(Some(arg_str)) => {
                let placeholder = format!("{{{}}}", arg_def.name);
                prompt_text = prompt_text.replace(&placeholder, arg_str);
            }
            Some(None) if arg_def.required => {
                return Err(McpError::invalid_params(
                    format!("Argument '{}' must be a string", arg_def.name),
                    None,
                ));
            }
            None if arg_def.required => {
                return Err(McpError::invalid_params(
                    format!("Required argument '{}' is missing", arg_def.name),
                    None,
                ));
            }
            _ => {
                let placeholder = format!("{{{}}}", arg_def.name);
                prompt_text = prompt_text.replace(&placeholder, "");
            }
        }
    }

    Ok(GetPromptResult {
        description: Some(template.description.clone()),
        messages: vec![PromptMessage {
            role: PromptMessageRole::User,
            content: PromptMessageContent::text(prompt_text),
        }],
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use trellis_core::{Operation, PlanError};

    use super::*;

    fn result_json(result: &CallToolResult) -> Value {
        serde_json::to_value(result).unwrap()
    }

    fn envelope_text(result: &CallToolResult) -> Value {
        let value = result_json(result);
        let text = value["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_envelope_result_success_and_error() {
        let tools = &mut OrchestrationTools::default();
        let ok = tools.reset_plan(&Default::default());
        let result = envelope_result(&ok).unwrap();
        assert_ne!(result_json(&result)["isError"], json!(true));
        assert_eq!(envelope_text(&result)["result"]["active"], json!(false));

        let failed = Envelope::failure(Operation::NextActions, "s1", &PlanError::NoActivePlan);
        let result = envelope_result(&failed).unwrap();
        assert_eq!(result_json(&result)["isError"], json!(true));
        let envelope = envelope_text(&result);
        assert!(envelope["result"].is_null());
        assert_eq!(envelope["metadata"]["error_kind"], "state");
    }

    #[tokio::test]
    async fn test_handlers_share_one_store() {
        let handlers = McpHandlers::new(Arc::new(Mutex::new(OrchestrationTools::default())));

        let params: CreatePlan = serde_json::from_value(json!({
            "session": "s1",
            "goal": "ship docs",
            "tasks": [{"title": "write", "priority": 5}, {"title": "review", "depends_on": [1]}]
        }))
        .unwrap();
        let result = handlers.create_plan(Parameters(params)).await.unwrap();
        assert_eq!(envelope_text(&result)["metadata"]["session"], "s1");

        let params: NextActions =
            serde_json::from_value(json!({"session": "s1", "max_actions": 5})).unwrap();
        let result = handlers.next_actions(Parameters(params)).await.unwrap();
        let envelope = envelope_text(&result);
        assert_eq!(envelope["result"]["actions"].as_array().unwrap().len(), 1);
        assert_eq!(envelope["result"]["actions"][0]["title"], "write");

        // The default session has no plan
        let params = SessionOnly::from(core::Scoped::default());
        let result = handlers.summarize_progress(Parameters(params)).await.unwrap();
        assert_eq!(result_json(&result)["isError"], json!(true));
    }

    #[tokio::test]
    async fn test_missing_title_answers_with_validation_envelope() {
        let handlers = McpHandlers::new(Arc::new(Mutex::new(OrchestrationTools::default())));
        let params: CreatePlan =
            serde_json::from_value(json!({"goal": "g", "tasks": [{"title": "a"}]})).unwrap();
        handlers.create_plan(Parameters(params)).await.unwrap();

        let params: AddTask = serde_json::from_value(json!({"priority": 1})).unwrap();
        let result = handlers.add_task(Parameters(params)).await.unwrap();
        assert_eq!(result_json(&result)["isError"], json!(true));
        let envelope = envelope_text(&result);
        assert_eq!(envelope["metadata"]["error_kind"], "validation");

        let result = handlers
            .summarize_progress(Parameters(SessionOnly::from(core::Scoped::default())))
            .await
            .unwrap();
        assert_eq!(envelope_text(&result)["result"]["total"], json!(1));
    }

    #[test]
    fn test_params_accept_optional_session() {
        let params: AddTask =
            serde_json::from_value(json!({"title": "Review", "depends_on": [1]})).unwrap();
        assert_eq!(params.as_ref().session, None);
        assert_eq!(params.as_ref().params.title, "Review");

        let params: SessionOnly = serde_json::from_value(json!({"session": "s1"})).unwrap();
        assert_eq!(params.as_ref().session.as_deref(), Some("s1"));
    }

    #[test]
    fn test_render_prompt_substitutes_arguments() {
        let request: GetPromptRequestParam = serde_json::from_value(json!({
            "name": "plan",
            "arguments": {"goal": "Ship the docs site"}
        }))
        .unwrap();
        let result = render_prompt(&request).unwrap();
        let text = serde_json::to_value(&result.messages[0].content).unwrap();
        let text = text["text"].as_str().unwrap();
        assert!(text.contains("Ship the docs site"));
        assert!(!text.contains("{goal}"));
    }

    #[test]
    fn test_render_prompt_requires_arguments() {
        let request: GetPromptRequestParam =
            serde_json::from_value(json!({"name": "plan"})).unwrap();
        assert!(render_prompt(&request).is_err());

        let request: GetPromptRequestParam =
            serde_json::from_value(json!({"name": "unknown"})).unwrap();
        assert!(render_prompt(&request).is_err());
    }

    #[test]
    fn test_prompt_definitions_listed() {
        let names: Vec<String> = list_prompt_definitions()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["plan", "execute"]);
    }
}
