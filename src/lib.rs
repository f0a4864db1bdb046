//! # gemini-live-agent
//!
//! 基于 Gemini Live 流式接口的轻量级工具调用代理：注册本地函数，发送任务，自动应答模型的工具调用。
//!
//! A thin tool-calling agent over the Gemini Live streaming API. Register
//! local functions as tools, send a natural-language task, and the agent
//! answers the model's tool calls until the turn completes.
//!
//! ## Overview
//!
//! Each run opens one Live session, advertises the registered tool
//! declarations (plus the built-in code-execution and Google Search tools
//! when enabled), sends the task as a single user turn and relays
//! `toolCall` messages to the local registry. Text fragments and a marker
//! for every tool invocation are collected into the returned transcript.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gemini_live_agent::{Agent, FunctionTool, RunOptions};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct WeatherArgs {
//!     location: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> gemini_live_agent::Result<()> {
//!     let mut agent = Agent::new("gemini-2.0-flash-exp", Some("Be concise."))?;
//!
//!     agent.add_tool(
//!         FunctionTool::builder("get_current_weather")
//!             .description("Gets the current weather for a given location.")
//!             .param::<str>("location")
//!             .handler(|args: WeatherArgs| {
//!                 Ok(json!({"location": args.location, "temperature": 22}))
//!             }),
//!     );
//!
//!     let answer = agent
//!         .run("What's the weather in New York?", RunOptions::default())
//!         .await;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`agent`] | Agent, run options and the session relay loop |
//! | [`tools`] | Tool trait, closure-backed tools, schema mapping and registry |
//! | [`live`] | Live session traits and the WebSocket transport |
//! | [`types`] | Wire types for setup, client and server messages |
//! | [`config`] | Credential and endpoint resolution |
//! | [`demo`] | Static travel and scheduling demo tools |

pub mod agent;
pub mod config;
pub mod demo;
pub mod live;
pub mod tools;
pub mod types;

// Re-export main types for convenience
pub use agent::{Agent, AgentBuilder, RunOptions, RunOutcome, ToolInvocation};
pub use live::{LiveConnector, LiveSession};
pub use tools::{FunctionTool, Tool, ToolRegistry};
pub use types::tool::{FunctionCall, FunctionDeclaration, FunctionResponse};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ToolError};
