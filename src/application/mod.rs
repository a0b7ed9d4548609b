//! # Application Layer
//!
//! Contains the core logic of the bot: the command grammar, authorization,
//! the orchestrator that runs each command, reply delivery and value formatting.

pub mod auth;
pub mod formatter;
pub mod grammar;
pub mod orchestrator;
pub mod responder;
pub mod router;
