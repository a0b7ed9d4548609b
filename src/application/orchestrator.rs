//! # Orchestrator
//!
//! Runs the call sequence for one matched command: authorize, obtain an API client for
//! the requester, run the handler, and report any failure back through the response
//! channel. Failures end that one sequence and nothing else.

use std::sync::Arc;

use crate::application::auth::Authorizer;
use crate::application::grammar::{Command, CommandTable, Invocation, Validation};
use crate::application::responder::ResponseChannel;
use crate::domain::config::CommandsConfig;
use crate::domain::errors::CommandError;
use crate::domain::traits::{ClientFactory, CredentialStore};
use crate::interface::commands::{self, CommandContext};

pub struct Orchestrator {
    table: Arc<CommandTable>,
    authorizer: Authorizer,
    clients: Arc<dyn ClientFactory>,
    credentials: Option<Arc<dyn CredentialStore>>,
    settings: CommandsConfig,
}

impl Orchestrator {
    pub fn new(
        table: Arc<CommandTable>,
        authorizer: Authorizer,
        clients: Arc<dyn ClientFactory>,
        credentials: Option<Arc<dyn CredentialStore>>,
        settings: CommandsConfig,
    ) -> Self {
        Self {
            table,
            authorizer,
            clients,
            credentials,
            settings,
        }
    }

    /// Executes `invocation`, reporting the outcome on `channel`.
    pub async fn execute(&self, invocation: &Invocation<'_>, channel: &ResponseChannel) {
        tracing::info!(
            "Executing '{}' for {}",
            invocation.pattern.name,
            invocation.requester
        );

        if let Err(e) = self.run(invocation, channel).await {
            match &e {
                CommandError::Remote(_) | CommandError::UnexpectedResponse(_) => {
                    tracing::error!("'{}' failed: {}", invocation.pattern.name, e)
                }
                _ => tracing::info!("'{}' stopped: {}", invocation.pattern.name, e),
            }
            channel.send(&e.to_string()).await;
        }
    }

    async fn run(
        &self,
        invocation: &Invocation<'_>,
        channel: &ResponseChannel,
    ) -> Result<(), CommandError> {
        let requester = invocation.requester.as_str();
        let command = &invocation.command;

        self.authorizer.authorize(requester, &command.scope())?;

        // Commands that never reach Heroku.
        match command {
            Command::Help => {
                commands::help::handle_help(&self.table, channel).await;
                return Ok(());
            }
            Command::Login { token } => {
                let store = self.credential_store()?;
                return commands::auth::handle_login(store, channel, requester, token).await;
            }
            Command::Logout => {
                let store = self.credential_store()?;
                return commands::auth::handle_logout(store, channel, requester).await;
            }
            _ => {}
        }

        if command.validate(&self.settings)? == Validation::Ignore {
            return Ok(());
        }

        let ctx = CommandContext {
            api: self.clients.client_for(requester).await?,
            channel,
            settings: &self.settings,
        };

        match command {
            Command::ListApps { filter } => {
                commands::apps::handle_list_apps(&ctx, filter.as_deref()).await
            }
            Command::AppInfo { app } => commands::apps::handle_info(&ctx, app).await,
            Command::Dynos { app } => commands::dynos::handle_dynos(&ctx, app).await,
            Command::Releases { app } => commands::releases::handle_releases(&ctx, app).await,
            Command::Rollback { app, version } => {
                commands::releases::handle_rollback(&ctx, app, version).await
            }
            Command::Restart { app, dyno } => {
                commands::dynos::handle_restart(&ctx, app, dyno.as_deref()).await
            }
            Command::Migrate { app } => commands::one_off::handle_migrate(&ctx, app).await,
            Command::ConfigKeys { app } => {
                commands::config_vars::handle_config_keys(&ctx, app).await
            }
            Command::ConfigSet { app, key, value } => {
                commands::config_vars::handle_config_set(&ctx, app, key, value).await
            }
            Command::ConfigUnset { app, key } => {
                commands::config_vars::handle_config_unset(&ctx, app, key).await
            }
            Command::Run { runner, task, app } => {
                commands::one_off::handle_run(&ctx, runner, task, app).await
            }
            Command::Scale {
                app,
                process_type,
                quantity,
                size,
            } => {
                commands::dynos::handle_scale(&ctx, app, process_type, *quantity, size.as_deref())
                    .await
            }
            Command::Help | Command::Login { .. } | Command::Logout => Ok(()),
        }
    }

    fn credential_store(&self) -> Result<&dyn CredentialStore, CommandError> {
        self.credentials
            .as_deref()
            .ok_or_else(|| CommandError::CredentialStore("no credential store configured".to_string()))
    }
}
