//! Gemini Live over WebSocket.
//!
//! - The API key travels as the `?key=` query parameter.
//! - Every frame is one JSON message; the server sends binary frames, text
//!   frames are accepted too.
//! - The first client frame is `setup`; the server answers `setupComplete`.
//! - Ping/pong is answered by the WebSocket layer.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::error::Error as WsError;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use super::{LiveConnector, LiveSession, TransportError};
use crate::config::LiveConfig;
use crate::error::{Error, ErrorContext};
use crate::types::events::{ClientMessage, ServerMessage, SessionSetup};
use crate::Result;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connects to the Live endpoint described by a [`LiveConfig`].
#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    config: LiveConfig,
}

impl WebSocketConnector {
    pub fn new(config: LiveConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LiveConfig::from_env()?))
    }

    pub fn config(&self) -> &LiveConfig {
        &self.config
    }
}

#[async_trait]
impl LiveConnector for WebSocketConnector {
    async fn connect(&self, setup: &SessionSetup) -> Result<Box<dyn LiveSession>> {
        let url = self.config.session_url();
        debug!(
            endpoint = %self.config.endpoint,
            api_version = %self.config.api_version,
            "opening live websocket"
        );

        let (stream, _response) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(TransportError::from)?;

        let mut session = WebSocketSession::new(stream);
        session
            .send(&ClientMessage::Setup(setup.clone()))
            .await?;
        session.await_setup_complete().await?;

        info!(model = %setup.model, tools = setup.tools.len(), "live session ready");
        Ok(Box::new(session))
    }
}

/// An open Live WebSocket.
pub struct WebSocketSession {
    stream: WsStream,
    closed: bool,
    close_reason: Option<String>,
}

impl WebSocketSession {
    fn new(stream: WsStream) -> Self {
        Self {
            stream,
            closed: false,
            close_reason: None,
        }
    }

    /// Close code and reason sent by the server, if it closed the stream.
    pub fn close_reason(&self) -> Option<&str> {
        self.close_reason.as_deref()
    }

    async fn await_setup_complete(&mut self) -> Result<()> {
        loop {
            match self.receive().await {
                Some(Ok(msg)) if msg.setup_complete.is_some() => return Ok(()),
                Some(Ok(other)) => {
                    debug!(?other, "ignoring frame received before setupComplete");
                }
                Some(Err(e)) => return Err(e),
                None => {
                    let mut context = ErrorContext::new()
                        .with_field_path("setupComplete")
                        .with_source("websocket_session");
                    if let Some(reason) = &self.close_reason {
                        context = context.with_details(reason.clone());
                    }
                    return Err(Error::protocol_with_context(
                        "server closed the stream before setupComplete",
                        context,
                    ));
                }
            }
        }
    }
}

fn decode(payload: &[u8]) -> Result<ServerMessage> {
    serde_json::from_slice(payload).map_err(|e| {
        let preview: String = String::from_utf8_lossy(payload).chars().take(200).collect();
        Error::protocol_with_context(
            format!("undecodable server message: {}", e),
            ErrorContext::new()
                .with_details(preview)
                .with_source("websocket_session"),
        )
    })
}

#[async_trait]
impl LiveSession for WebSocketSession {
    async fn send(&mut self, message: &ClientMessage) -> Result<()> {
        let payload = serde_json::to_string(message)?;
        self.stream
            .send(Message::Text(payload))
            .await
            .map_err(TransportError::from)?;
        Ok(())
    }

    async fn receive(&mut self) -> Option<Result<ServerMessage>> {
        if self.closed {
            return None;
        }

        while let Some(frame) = self.stream.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => break,
                Err(e) => return Some(Err(TransportError::from(e).into())),
            };

            match frame {
                Message::Text(text) => return Some(decode(text.as_bytes())),
                Message::Binary(bytes) => return Some(decode(&bytes)),
                Message::Close(frame) => {
                    if let Some(frame) = frame {
                        let reason = format!("{} {}", u16::from(frame.code), frame.reason);
                        debug!(reason = %reason, "server closed live session");
                        self.close_reason = Some(reason);
                    }
                    break;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            }
        }

        self.closed = true;
        None
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.stream.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(TransportError::from(e).into()),
        }
    }
}
