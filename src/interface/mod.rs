//! # Interface Layer
//!
//! User-facing command handlers, one module per command family.

pub mod commands;
