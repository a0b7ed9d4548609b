//! Test doubles for the external collaborators.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crate::domain::errors::{ApiError, CommandError};
use crate::domain::traits::{ChatProvider, ClientFactory, HerokuApi};

/// Loads a JSON fixture from `tests/fixtures`.
macro_rules! fixture {
    ($name:literal) => {
        serde_json::from_str::<serde_json::Value>(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/",
            $name
        )))
        .unwrap()
    };
}
pub(crate) use fixture;

/// Chat provider that records every delivered message with its thread.
#[derive(Default)]
pub struct RecordingChat {
    sent: Mutex<Vec<(String, Option<String>)>>,
    fail: bool,
}

impl RecordingChat {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, Option<String>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(text, _)| text).collect()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_message(&self, content: &str, thread_id: Option<&str>) -> Result<String, String> {
        if self.fail {
            return Err("room is gone".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((content.to_string(), thread_id.map(str::to_string)));
        Ok(format!("$sent{}", sent.len()))
    }

    fn room_id(&self) -> String {
        "!room:example.org".to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub range: Option<String>,
    pub body: Option<Value>,
}

/// Heroku API fake answering calls from a queue of canned responses.
#[derive(Default)]
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    pub fn fail(self, status: u16, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::new(status, message)));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        range: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            range: range.map(str::to_string),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport(format!("unexpected {method} {path}"))))
    }
}

#[async_trait]
impl HerokuApi for ScriptedApi {
    async fn get(&self, path: &str, range: Option<&str>) -> Result<Value, ApiError> {
        self.record("GET", path, range, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.record("POST", path, None, Some(body))
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.record("PATCH", path, None, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.record("DELETE", path, None, None)
    }
}

/// Factory that hands every requester the same scripted client.
pub struct FixedFactory(pub Arc<ScriptedApi>);

#[async_trait]
impl ClientFactory for FixedFactory {
    async fn client_for(&self, _requester: &str) -> Result<Arc<dyn HerokuApi>, CommandError> {
        Ok(self.0.clone())
    }
}

/// In-memory sink for `tracing` output, installed per test with `set_default`.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
