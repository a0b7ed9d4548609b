//! # Domain Types
//!
//! Common data structures used across the application logic.

use serde::Deserialize;

/// One inbound chat message, as handed over by a chat adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    /// Platform identifier of the message itself (Matrix event id, Slack ts, ...)
    pub id: String,
    /// Requester identity
    pub sender: String,
    pub body: String,
    /// Thread the message was posted in, if any
    pub thread_id: Option<String>,
}

impl InboundMessage {
    pub fn new(id: impl Into<String>, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            body: body.into(),
            thread_id: None,
        }
    }

    pub fn in_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }
}

/// Which role a command requires before any remote call is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScope {
    /// Open to everyone.
    Public,
    /// Requires the global admin role.
    Admin,
    /// Requires the role scoped to this app, or admin.
    App(String),
}

// Heroku Platform API shapes. Only the fields the commands read are modelled.

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dyno {
    pub name: String,
    #[serde(rename = "type")]
    pub process_type: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub state: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub id: String,
    pub version: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user: Option<ReleaseUser>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseUser {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSession {
    pub logplex_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Formation {
    #[serde(rename = "type")]
    pub process_type: String,
    pub quantity: serde_json::Value,
    #[serde(default)]
    pub size: String,
}
