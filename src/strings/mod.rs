//! # Strings Module
//!
//! Centralizes user-facing strings and log text.
//! Ensures consistency in messaging and easier updates.

pub mod logs;
pub mod messages;
