//! Request/response relay for one Live session.
//!
//! The relay sends the task as a single user turn, then alternates between
//! waiting for a server frame and reacting to it until the turn completes or
//! the server closes the stream:
//!
//! ```text
//! AwaitingMessage --text--> AwaitingMessage        (append to transcript)
//! AwaitingMessage --toolCall--> AwaitingMessage    (dispatch, send one toolResponse)
//! AwaitingMessage --turnComplete | close--> Closed
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::live::LiveSession;
use crate::tools::ToolRegistry;
use crate::types::events::{ClientMessage, ServerMessage};
use crate::types::tool::{FunctionCall, FunctionResponse};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    AwaitingMessage,
    Closed,
}

/// One tool call handled during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInvocation {
    pub call: FunctionCall,
    pub response: FunctionResponse,
}

/// Structured result of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunOutcome {
    /// Model text with one marker per tool invocation, trimmed.
    pub text: String,
    pub invocations: Vec<ToolInvocation>,
}

impl RunOutcome {
    pub fn failed_invocations(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.invocations.iter().filter(|i| i.response.is_error())
    }
}

/// Inline transcript marker for a tool invocation.
pub fn tool_marker(call: &FunctionCall) -> String {
    format!("\n🔧 **Tool**: `{}`\n\n", call.signature())
}

/// Ordered text fragments and tool markers.
#[derive(Debug, Default)]
pub struct Transcript {
    fragments: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(text);
        }
    }

    pub fn push_tool_call(&mut self, call: &FunctionCall) {
        self.fragments.push(tool_marker(call));
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn finish(self) -> String {
        self.fragments.concat().trim().to_string()
    }
}

pub(crate) struct Relay<'a> {
    registry: &'a ToolRegistry,
    transcript: Transcript,
    invocations: Vec<ToolInvocation>,
    state: RelayState,
}

impl<'a> Relay<'a> {
    pub(crate) fn new(registry: &'a ToolRegistry) -> Self {
        Self {
            registry,
            transcript: Transcript::new(),
            invocations: Vec::new(),
            state: RelayState::AwaitingMessage,
        }
    }

    pub(crate) async fn run(
        mut self,
        session: &mut dyn LiveSession,
        task: &str,
    ) -> Result<RunOutcome> {
        session.send(&ClientMessage::user_turn(task)).await?;

        while self.state == RelayState::AwaitingMessage {
            match session.receive().await {
                Some(Ok(message)) => self.on_message(session, message).await?,
                Some(Err(e)) => return Err(e),
                None => {
                    debug!("server closed the stream");
                    self.state = RelayState::Closed;
                }
            }
        }

        Ok(RunOutcome {
            text: self.transcript.finish(),
            invocations: self.invocations,
        })
    }

    async fn on_message(
        &mut self,
        session: &mut dyn LiveSession,
        message: ServerMessage,
    ) -> Result<()> {
        let turn_complete = message.is_turn_complete();

        if let Some(text) = message.text() {
            debug!(len = text.len(), "text fragment");
            self.transcript.push_text(text);
        }

        if let Some(content) = &message.server_content {
            if let Some(turn) = &content.model_turn {
                for part in turn.parts.iter().filter(|p| !p.is_text()) {
                    if let Some(code) = &part.executable_code {
                        debug!(code = %code, "model executed code");
                    }
                    if let Some(result) = &part.code_execution_result {
                        debug!(result = %result, "code execution result");
                    }
                }
            }
            if content.interrupted {
                debug!("generation interrupted");
            }
        }

        if let Some(tool_call) = message.tool_call {
            let calls = tool_call.function_calls;
            for call in &calls {
                self.transcript.push_tool_call(call);
            }

            let mut responses = Vec::with_capacity(calls.len());
            for call in calls {
                debug!(tool = %call.name, id = ?call.id, "dispatching tool call");
                let response = self.registry.dispatch(&call);
                responses.push(response.clone());
                self.invocations.push(ToolInvocation { call, response });
            }

            if !responses.is_empty() {
                session
                    .send(&ClientMessage::tool_response(responses))
                    .await?;
            }
        }

        if let Some(cancellation) = &message.tool_call_cancellation {
            warn!(ids = ?cancellation.ids, "server cancelled tool calls that already ran");
        }
        if let Some(go_away) = &message.go_away {
            warn!(time_left = ?go_away.time_left, "server announced disconnect");
        }
        if let Some(usage) = &message.usage_metadata {
            debug!(usage = %usage, "usage metadata");
        }

        if turn_complete {
            self.state = RelayState::Closed;
        }
        Ok(())
    }
}
