//! 类型系统模块：定义 Gemini Live 会话使用的数据类型。
//!
//! # Types Module
//!
//! Strongly-typed representations of everything that crosses the Live session
//! boundary: session setup, user turns, model turns, function calls and
//! function responses.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FunctionDeclaration`] | Tool schema advertised to the model |
//! | [`FunctionCall`] | Function invocation issued by the model |
//! | [`FunctionResponse`] | Result or error payload sent back for a call |
//! | [`SessionSetup`] | First frame of a session (model, tools, instruction) |
//! | [`ClientMessage`] | Frames sent by the client |
//! | [`ServerMessage`] | Frames sent by the server |
//!
//! ## Submodules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`events`] | Client and server session frames |
//! | [`message`] | Turn content and parts |
//! | [`tool`] | Function declaration and calling types |
//!
//! ## Example
//!
//! ```rust
//! use gemini_live_agent::types::{ClientMessage, ServerMessage};
//!
//! let turn = ClientMessage::user_turn("What's the weather?");
//! let frame: ServerMessage =
//!     serde_json::from_str(r#"{"serverContent":{"modelTurn":{"parts":[{"text":"Sunny"}]}}}"#)
//!         .unwrap();
//! assert_eq!(frame.text().as_deref(), Some("Sunny"));
//! # let _ = turn;
//! ```

pub mod events;
pub mod message;
pub mod tool;

pub use events::{ClientMessage, Empty, ServerMessage, SessionSetup, ToolSpec};
pub use message::{Content, Part, Role};
pub use tool::{
    FunctionCall, FunctionDeclaration, FunctionResponse, ParamType, ParameterSchema,
    ParameterSpec,
};
