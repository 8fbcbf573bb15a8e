/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Routes tool calls to the progression engine
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;

use jsonrpc_core::ErrorCode;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::engine::{Clock, SystemClock};
use crate::mcp::protocol::*;
use crate::storage::KeyValueStore;
use crate::tools::{self, ToolError};
use crate::{MoodBloomServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer<S, C = SystemClock> {
    app: MoodBloomServer<S, C>,
    initialized: bool,
}

impl<S: KeyValueStore, C: Clock> McpServer<S, C> {
    pub fn new(app: MoodBloomServer<S, C>) -> Self {
        Self {
            app,
            initialized: false,
        }
    }

    pub fn app(&self) -> &MoodBloomServer<S, C> {
        &self.app
    }

    /// Whether the client has sent its `initialized` notification
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    ErrorCode::ParseError,
                    format!("Invalid JSON: {}", e),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                ErrorCode::InvalidRequest,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
            ));
        }

        if request.is_notification() {
            if request.method.ends_with("initialized") {
                self.initialized = true;
                debug!("Client finished initialization");
            }
            return None;
        }

        Some(self.handle_request(request).await)
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                ErrorCode::MethodNotFound,
                format!("Method '{}' not found", request.method),
            ),
        }
    }

    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let client = request
            .params
            .and_then(|params| serde_json::from_value::<InitializeParams>(params).ok());
        match client {
            Some(InitializeParams { client_info: Some(info), protocol_version }) => info!(
                "MCP client connected: {} {} (protocol {})",
                info.name,
                info.version.unwrap_or_default(),
                protocol_version.unwrap_or_default()
            ),
            _ => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "MoodBloom".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::from_serializable(request.id, &result)
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id, json!({ "tools": tool_definitions() }))
    }

    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        ErrorCode::InvalidParams,
                        format!("Invalid parameters: {}", e),
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    ErrorCode::InvalidParams,
                    "Missing parameters".to_string(),
                );
            }
        };

        let name = tool_params.name;
        let result = match self.call_tool(&name, tool_params.arguments).await {
            Some(Ok(text)) => ToolCallResult::success(text),
            Some(Err(e)) => {
                warn!("Tool {} failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
            None => ToolCallResult::error(format!("Unknown tool: {}", name)),
        };

        JsonRpcResponse::from_serializable(request.id, &result)
    }

    /// Run a tool by name, `None` if no such tool exists
    async fn call_tool(
        &mut self,
        name: &str,
        args: HashMap<String, Value>,
    ) -> Option<Result<String, ToolError>> {
        let entitlement = self.app.entitlement().await;
        let engine = self.app.engine_mut();

        let result = match name {
            "mood_log" => parse_args(args)
                .and_then(|p| tools::log_mood(engine, p))
                .map(|r| r.message),
            "journal_add" => parse_args(args)
                .and_then(|p| tools::add_journal_entry(engine, entitlement, p))
                .map(|r| format!("{}\nEntry ID: {}", r.message, r.entry_id)),
            "ritual_complete" => parse_args(args)
                .and_then(|p| tools::complete_ritual(engine, entitlement, p))
                .map(|r| r.message),
            "progress_status" => parse_args(args)
                .and_then(|p| tools::get_progress_status(engine, p))
                .map(|r| r.message),
            "garden_view" => parse_args(args)
                .and_then(|p| tools::view_garden(engine, entitlement, p))
                .map(|r| r.message),
            "achievements_list" => parse_args(args)
                .and_then(|p| tools::list_achievements(engine, p))
                .map(|r| r.message),
            "today_overview" => parse_args(args)
                .and_then(|p| tools::today_overview(engine, entitlement, p))
                .map(|r| r.message),
            "profile_update" => parse_args(args)
                .and_then(|p| tools::update_profile(engine, p))
                .map(|r| r.message),
            "onboarding_complete" => parse_args(args)
                .and_then(|p| tools::complete_onboarding(engine, p))
                .map(|r| r.message),
            "theme_set" => parse_args(args)
                .and_then(|p| tools::set_theme(engine, entitlement, p))
                .map(|r| r.message),
            _ => return None,
        };

        Some(result)
    }
}

fn parse_args<T: DeserializeOwned>(args: HashMap<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args.into_iter().collect()))
        .map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

fn tool<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let schema = schemars::schema_for!(T);
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" })),
    }
}

/// Every tool this server offers, with argument schemas
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool::<tools::LogMoodParams>(
            "mood_log",
            "Log today's mood (once per day). Earns XP and extends the streak",
        ),
        tool::<tools::AddJournalParams>(
            "journal_add",
            "Write a journal entry. Tags require premium",
        ),
        tool::<tools::CompleteRitualParams>(
            "ritual_complete",
            "Complete a wellness ritual, today's ritual if none is given",
        ),
        tool::<tools::StatusParams>(
            "progress_status",
            "Show XP, streaks, today's tasks and the next plant to unlock",
        ),
        tool::<tools::GardenParams>(
            "garden_view",
            "Show the garden: planted, growing and premium plants",
        ),
        tool::<tools::AchievementsParams>(
            "achievements_list",
            "List achievements with progress toward each",
        ),
        tool::<tools::TodayParams>(
            "today_overview",
            "Today's ritual, affirmation and remaining daily tasks",
        ),
        tool::<tools::UpdateProfileParams>(
            "profile_update",
            "Update name, avatar, favorite color, notifications or reminder time",
        ),
        tool::<tools::OnboardingParams>(
            "onboarding_complete",
            "Finish onboarding and set the name to greet the user with",
        ),
        tool::<tools::ThemeParams>(
            "theme_set",
            "Change the garden theme. Themes other than spring require premium",
        ),
    ]
}
