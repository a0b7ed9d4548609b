//! # Domain Traits
//!
//! Abstract interfaces for the external collaborators (chat surface, Heroku API, credential store).
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::errors::{ApiError, CommandError};

/// Abstract interface for a Chat Provider (e.g., Matrix, Slack, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room, into the thread rooted at `thread_id` when given.
    /// Returns the id of the sent message.
    async fn send_message(&self, content: &str, thread_id: Option<&str>) -> Result<String, String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// The Heroku Platform API, one client per credential.
#[async_trait]
pub trait HerokuApi: Send + Sync {
    /// `range` is sent verbatim as the `Range` header.
    async fn get(&self, path: &str, range: Option<&str>) -> Result<Value, ApiError>;

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<Value, ApiError>;
}

/// Hands out a configured API client for a requester.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn client_for(&self, requester: &str) -> Result<Arc<dyn HerokuApi>, CommandError>;
}

/// Per-requester API tokens, persisted outside the core.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, requester: &str) -> Result<Option<String>, String>;

    async fn set(&self, requester: &str, token: &str) -> Result<(), String>;

    async fn remove(&self, requester: &str) -> Result<(), String>;
}
