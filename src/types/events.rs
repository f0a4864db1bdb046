//! Live session messages (`BidiGenerateContent` client and server frames)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Content;
use super::tool::{FunctionCall, FunctionDeclaration, FunctionResponse};

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// One entry of the `tools` list in the session setup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolSpec {
    FunctionDeclarations(Vec<FunctionDeclaration>),
    CodeExecution(Empty),
    GoogleSearch(Empty),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            response_modalities: vec!["TEXT".to_string()],
        }
    }
}

/// First message of every session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSetup {
    pub model: String,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
}

impl SessionSetup {
    /// Bare model ids are qualified with `models/`.
    pub fn new(model: &str) -> Self {
        let model = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        Self {
            model,
            generation_config: GenerationConfig::default(),
            system_instruction: None,
            tools: Vec::new(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: Option<&str>) -> Self {
        self.system_instruction = instruction
            .filter(|s| !s.is_empty())
            .map(Content::instruction);
        self
    }

    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn function_declarations(&self) -> &[FunctionDeclaration] {
        self.tools
            .iter()
            .find_map(|t| match t {
                ToolSpec::FunctionDeclarations(d) => Some(d.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn has_code_execution(&self) -> bool {
        self.tools
            .iter()
            .any(|t| matches!(t, ToolSpec::CodeExecution(_)))
    }

    pub fn has_google_search(&self) -> bool {
        self.tools
            .iter()
            .any(|t| matches!(t, ToolSpec::GoogleSearch(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContent {
    pub turns: Vec<Content>,
    pub turn_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub function_responses: Vec<FunctionResponse>,
}

/// Frames sent by the client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientMessage {
    Setup(SessionSetup),
    ClientContent(ClientContent),
    ToolResponse(ToolResponse),
}

impl ClientMessage {
    /// A complete user turn carrying `text`.
    pub fn user_turn(text: impl Into<String>) -> Self {
        ClientMessage::ClientContent(ClientContent {
            turns: vec![Content::user(text)],
            turn_complete: true,
        })
    }

    pub fn tool_response(function_responses: Vec<FunctionResponse>) -> Self {
        ClientMessage::ToolResponse(ToolResponse { function_responses })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_turn: Option<Content>,
    #[serde(default)]
    pub turn_complete: bool,
    #[serde(default)]
    pub interrupted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    #[serde(default)]
    pub function_calls: Vec<FunctionCall>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallCancellation {
    #[serde(default)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoAway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_left: Option<String>,
}

/// Frames sent by the server. Exactly one field is set in practice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_complete: Option<Empty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_content: Option<ServerContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_cancellation: Option<ToolCallCancellation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_away: Option<GoAway>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<Value>,
}

impl ServerMessage {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            server_content: Some(ServerContent {
                model_turn: Some(Content {
                    role: Some(super::message::Role::Model),
                    parts: vec![super::message::Part::text(text)],
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn from_tool_calls(function_calls: Vec<FunctionCall>) -> Self {
        Self {
            tool_call: Some(ToolCall { function_calls }),
            ..Default::default()
        }
    }

    pub fn turn_complete() -> Self {
        Self {
            server_content: Some(ServerContent {
                turn_complete: true,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn setup_complete() -> Self {
        Self {
            setup_complete: Some(Empty {}),
            ..Default::default()
        }
    }

    /// Text of the model turn carried by this message, if any.
    pub fn text(&self) -> Option<String> {
        self.server_content
            .as_ref()
            .and_then(|c| c.model_turn.as_ref())
            .and_then(Content::text)
    }

    pub fn is_turn_complete(&self) -> bool {
        self.server_content
            .as_ref()
            .map(|c| c.turn_complete)
            .unwrap_or(false)
    }
}
