//! # Domain Errors
//!
//! Failure taxonomy for a single command invocation. Every variant renders to exactly
//! one chat message; none of them is fatal to the process.

use crate::strings::messages;

/// Structured failure raised by the remote API collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", api_error_text(.status, .message))]
pub struct ApiError {
    /// HTTP status, absent when the request never got a response
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

fn api_error_text(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("{status} - {message}"),
        None => message.to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{}", messages::access_denied(.role))]
    AuthorizationDenied { role: String },

    #[error("{}", messages::remote_failure(.0))]
    Remote(#[from] ApiError),

    /// A local lookup over remote data found nothing; no mutation was issued.
    #[error("{0}")]
    NotFound(String),

    /// Input failed a local check; no remote call was issued.
    #[error("{0}")]
    Rejected(String),

    #[error("{}", messages::NOT_LOGGED_IN)]
    MissingCredential,

    #[error("Unexpected response from Heroku: {0}")]
    UnexpectedResponse(#[from] serde_json::Error),

    #[error("Credential store failure: {0}")]
    CredentialStore(String),
}
