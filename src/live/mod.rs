//! Live 会话抽象：通过 trait 隔离底层 WebSocket 连接
//!
//! Session abstraction over the Gemini Live `BidiGenerateContent` service.
//! [`LiveConnector`] opens a session for a [`SessionSetup`]; the returned
//! [`LiveSession`] sends client frames and yields server frames until the
//! server closes the stream. The agent only talks to these traits, so the
//! WebSocket implementation can be swapped for a scripted one in tests.

pub mod websocket;

use async_trait::async_trait;

use crate::types::events::{ClientMessage, ServerMessage, SessionSetup};
use crate::Result;

pub use websocket::{WebSocketConnector, WebSocketSession};

/// Opens Live sessions.
#[async_trait]
pub trait LiveConnector: Send + Sync + std::fmt::Debug {
    /// Connect and complete the setup handshake. The session is ready for
    /// client content once this returns.
    async fn connect(&self, setup: &SessionSetup) -> Result<Box<dyn LiveSession>>;
}

/// One open bidirectional session.
#[async_trait]
pub trait LiveSession: Send {
    async fn send(&mut self, message: &ClientMessage) -> Result<()>;

    /// Next server frame; `None` once the server has closed the stream.
    async fn receive(&mut self) -> Option<Result<ServerMessage>>;

    /// Close the session. Closing twice is a no-op.
    async fn close(&mut self) -> Result<()>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
