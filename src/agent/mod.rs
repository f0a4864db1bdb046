//! Tool-calling agent over a Live session.

pub mod relay;

use std::sync::Arc;

use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use crate::config::LiveConfig;
use crate::live::{LiveConnector, WebSocketConnector};
use crate::tools::{Tool, ToolRegistry};
use crate::types::events::{Empty, SessionSetup, ToolSpec};
use crate::Result;

pub use relay::{tool_marker, RelayState, RunOutcome, ToolInvocation, Transcript};

/// Per-run capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub enable_code_execution: bool,
    pub enable_google_search: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            enable_code_execution: true,
            enable_google_search: false,
        }
    }
}

impl RunOptions {
    pub fn code_execution(mut self, enable: bool) -> Self {
        self.enable_code_execution = enable;
        self
    }

    pub fn google_search(mut self, enable: bool) -> Self {
        self.enable_google_search = enable;
        self
    }
}

/// Gemini Live agent with locally registered tools.
///
/// Each [`Agent::run`] opens a fresh session, sends the task, answers tool
/// calls from the registry and returns the model's text.
pub struct Agent {
    model: String,
    system_instruction: Option<String>,
    registry: ToolRegistry,
    connector: Arc<dyn LiveConnector>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("model", &self.model)
            .field("system_instruction", &self.system_instruction)
            .field("registry", &self.registry)
            .field("connector", &self.connector)
            .finish()
    }
}

impl Agent {
    pub fn builder(model: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(model)
    }

    /// Agent on the default endpoint with the key from `GEMINI_API_KEY`.
    pub fn new(model: impl Into<String>, system_instruction: Option<&str>) -> Result<Self> {
        let mut builder = AgentBuilder::new(model);
        if let Some(instruction) = system_instruction {
            builder = builder.system_instruction(instruction);
        }
        builder.build()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Register a tool; its declaration is advertised on every later run.
    pub fn add_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.registry.add(tool);
    }

    pub fn add_shared_tool(&mut self, tool: Arc<dyn Tool>) {
        self.registry.add_shared(tool);
    }

    /// Setup frame for a run with `options`.
    pub fn session_setup(&self, options: &RunOptions) -> SessionSetup {
        let mut setup = SessionSetup::new(&self.model)
            .with_system_instruction(self.system_instruction.as_deref());
        if !self.registry.is_empty() {
            setup = setup.with_tool(ToolSpec::FunctionDeclarations(
                self.registry.declarations().to_vec(),
            ));
        }
        if options.enable_code_execution {
            setup = setup.with_tool(ToolSpec::CodeExecution(Empty {}));
        }
        if options.enable_google_search {
            setup = setup.with_tool(ToolSpec::GoogleSearch(Empty {}));
        }
        setup
    }

    /// Run `task` and return the model's text. Session failures are logged
    /// and returned as `"Error: ..."`; use [`Agent::try_run`] to get them as
    /// values.
    pub async fn run(&self, task: &str, options: RunOptions) -> String {
        match self.try_run(task, options).await {
            Ok(outcome) => outcome.text,
            Err(e) => {
                error!(error = %e, "Error during Live API session");
                format!("Error: {}", e)
            }
        }
    }

    /// Run `task`, returning the transcript and every tool invocation.
    pub async fn try_run(&self, task: &str, options: RunOptions) -> Result<RunOutcome> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("live_run", %run_id, model = %self.model);

        async move {
            let setup = self.session_setup(&options);
            info!(
                tools = self.registry.len(),
                code_execution = options.enable_code_execution,
                google_search = options.enable_google_search,
                "starting live session"
            );

            let mut session = self.connector.connect(&setup).await?;
            let outcome = relay::Relay::new(&self.registry)
                .run(session.as_mut(), task)
                .await;

            if let Err(e) = session.close().await {
                warn!(error = %e, "failed to close live session");
            }

            let outcome = outcome?;
            info!(
                invocations = outcome.invocations.len(),
                chars = outcome.text.len(),
                "live session finished"
            );
            Ok(outcome)
        }
        .instrument(span)
        .await
    }
}

/// Builder for [`Agent`].
///
/// Without an explicit connector the agent talks to the Gemini Live
/// WebSocket endpoint and `build` fails when no API key can be found.
pub struct AgentBuilder {
    model: String,
    system_instruction: Option<String>,
    api_key: Option<String>,
    endpoint: Option<String>,
    api_version: Option<String>,
    connector: Option<Arc<dyn LiveConnector>>,
}

impl AgentBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            api_key: None,
            endpoint: None,
            api_version: None,
            connector: None,
        }
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Use this key instead of `GEMINI_API_KEY`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the WebSocket endpoint (primarily for testing against a local server).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Use a custom session connector. Credentials are then the connector's concern.
    pub fn connector(mut self, connector: Arc<dyn LiveConnector>) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let connector = match self.connector {
            Some(connector) => connector,
            None => {
                let config = LiveConfig::resolve(
                    self.api_key,
                    self.endpoint,
                    self.api_version,
                    crate::config::env_var,
                )?;
                Arc::new(WebSocketConnector::new(config)) as Arc<dyn LiveConnector>
            }
        };

        Ok(Agent {
            model: self.model,
            system_instruction: self.system_instruction.filter(|s| !s.is_empty()),
            registry: ToolRegistry::new(),
            connector,
        })
    }
}
