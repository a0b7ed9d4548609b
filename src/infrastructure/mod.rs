//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, HerokuApi, CredentialStore).

pub mod console;
pub mod credentials;
pub mod heroku;
pub mod logging;
pub mod matrix;
