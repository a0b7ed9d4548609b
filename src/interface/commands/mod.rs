//! # Command Handlers
//!
//! Contains the call sequence for each supported command family.
//! These handlers are invoked by the Orchestrator once a command is authorized.

pub mod apps;
pub mod auth;
pub mod config_vars;
pub mod dynos;
pub mod help;
pub mod one_off;
pub mod releases;

use std::sync::Arc;

use crate::application::responder::ResponseChannel;
use crate::domain::config::CommandsConfig;
use crate::domain::traits::HerokuApi;

/// What a handler needs for one invocation.
pub struct CommandContext<'a> {
    pub api: Arc<dyn HerokuApi>,
    pub channel: &'a ResponseChannel,
    pub settings: &'a CommandsConfig,
}

pub(crate) fn app_path(app: &str) -> String {
    format!("/apps/{app}")
}
