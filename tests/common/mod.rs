//! Shared fixtures: a scripted Live connector and a one-shot WebSocket server.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use gemini_live_agent::error::{Error, ErrorContext};
use gemini_live_agent::live::{LiveConnector, LiveSession, TransportError};
use gemini_live_agent::types::{ClientMessage, ServerMessage, SessionSetup};
use gemini_live_agent::FunctionCall;
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;

pub fn call(name: &str, args: Value) -> FunctionCall {
    let args: Map<String, Value> = match args {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    FunctionCall::new(name, args)
}

/// One scripted server event.
#[derive(Debug, Clone)]
pub enum Step {
    Message(ServerMessage),
    Fail(String),
}

impl From<ServerMessage> for Step {
    fn from(message: ServerMessage) -> Self {
        Step::Message(message)
    }
}

/// What the agent did against a [`ScriptedConnector`].
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub setups: Arc<Mutex<Vec<SessionSetup>>>,
    pub sent: Arc<Mutex<Vec<ClientMessage>>>,
    pub closes: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn sent(&self) -> Vec<ClientMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn setups(&self) -> Vec<SessionSetup> {
        self.setups.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Tool response batches, in send order.
    pub fn tool_responses(&self) -> Vec<Vec<gemini_live_agent::FunctionResponse>> {
        self.sent()
            .into_iter()
            .filter_map(|m| match m {
                ClientMessage::ToolResponse(r) => Some(r.function_responses),
                _ => None,
            })
            .collect()
    }
}

/// Hands out one session that replays `script`; the stream ends after the
/// last step.
#[derive(Debug)]
pub struct ScriptedConnector {
    script: Mutex<VecDeque<Step>>,
    connect_error: Option<String>,
    pub recorder: Recorder,
}

impl ScriptedConnector {
    pub fn new(script: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            connect_error: None,
            recorder: Recorder::default(),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            connect_error: Some(message.into()),
            recorder: Recorder::default(),
        }
    }
}

#[async_trait]
impl LiveConnector for ScriptedConnector {
    async fn connect(
        &self,
        setup: &SessionSetup,
    ) -> gemini_live_agent::Result<Box<dyn LiveSession>> {
        if let Some(message) = &self.connect_error {
            return Err(TransportError::Other(message.clone()).into());
        }
        self.recorder.setups.lock().unwrap().push(setup.clone());
        let script = std::mem::take(&mut *self.script.lock().unwrap());
        Ok(Box::new(ScriptedSession {
            script,
            recorder: self.recorder.clone(),
        }))
    }
}

pub struct ScriptedSession {
    script: VecDeque<Step>,
    recorder: Recorder,
}

#[async_trait]
impl LiveSession for ScriptedSession {
    async fn send(&mut self, message: &ClientMessage) -> gemini_live_agent::Result<()> {
        self.recorder.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn receive(&mut self) -> Option<gemini_live_agent::Result<ServerMessage>> {
        match self.script.pop_front()? {
            Step::Message(message) => Some(Ok(message)),
            Step::Fail(reason) => Some(Err(Error::protocol_with_context(
                reason,
                ErrorContext::new().with_source("scripted_session"),
            ))),
        }
    }

    async fn close(&mut self) -> gemini_live_agent::Result<()> {
        self.recorder.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One step of the local WebSocket server.
#[derive(Debug, Clone)]
pub enum ServerStep {
    /// Read one client frame and record it as JSON.
    Expect,
    Send(Message),
}

pub fn json_frame(value: Value) -> Message {
    Message::Binary(value.to_string().into_bytes())
}

pub fn text_frame(value: Value) -> Message {
    Message::Text(value.to_string())
}

/// What the local server saw.
#[derive(Debug, Default)]
pub struct ServerLog {
    pub request_uri: String,
    pub frames: Vec<Value>,
}

/// Accept one WebSocket client on `127.0.0.1`, play `steps`, then drain the
/// connection until the client goes away.
pub async fn serve_once(steps: Vec<ServerStep>) -> (SocketAddr, JoinHandle<ServerLog>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let uri = Arc::new(Mutex::new(String::new()));
        let seen = uri.clone();
        let callback = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            *seen.lock().unwrap() = req.uri().to_string();
            Ok(resp)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(tcp, callback)
            .await
            .unwrap();

        let mut log = ServerLog {
            request_uri: uri.lock().unwrap().clone(),
            frames: Vec::new(),
        };

        for step in steps {
            match step {
                ServerStep::Expect => loop {
                    match ws.next().await {
                        Some(Ok(Message::Text(text))) => {
                            log.frames.push(serde_json::from_str(&text).unwrap());
                            break;
                        }
                        Some(Ok(Message::Binary(bytes))) => {
                            log.frames.push(serde_json::from_slice(&bytes).unwrap());
                            break;
                        }
                        Some(Ok(_)) => continue,
                        _ => return log,
                    }
                },
                ServerStep::Send(frame) => {
                    if ws.send(frame).await.is_err() {
                        return log;
                    }
                }
            }
        }

        while let Some(Ok(_)) = ws.next().await {}
        log
    });

    (addr, handle)
}
