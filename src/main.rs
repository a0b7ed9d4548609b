//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: configuration, errors, types and collaborator traits
//! - Infrastructure: Heroku client, credential store, Matrix and console adapters, logging
//! - Application: grammar, authorizer, orchestrator, responder, router
//! - Interface: command handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::auth::Authorizer;
use crate::application::grammar::CommandTable;
use crate::application::orchestrator::Orchestrator;
use crate::application::router::CommandRouter;
use crate::domain::config::{AppConfig, CredentialMode, MatrixConfig};
use crate::domain::paths;
use crate::domain::traits::{ChatProvider, ClientFactory, CredentialStore};
use crate::infrastructure::credentials::FileCredentialStore;
use crate::infrastructure::heroku::{GlobalKeyFactory, HttpHerokuClient, PerUserFactory, http_client};
use crate::infrastructure::matrix::{MatrixService, inbound_from_event};
use crate::infrastructure::{console, logging};
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(version, about = "Chat-ops bot for Heroku apps")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = paths::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Read commands from stdin instead of connecting to Matrix
    #[arg(long)]
    console: bool,

    /// Requester identity used for console commands
    #[arg(long, default_value = "console")]
    user: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging (stdout belongs to replies in console mode)
    let _guard = logging::init(&config.system.data_dir, !args.console)?;
    tracing::info!("{}", logs::STARTING);

    // 3. Write-once command table and authorization
    let table = Arc::new(
        CommandTable::new(config.bot.name.as_deref(), config.heroku.credentials)
            .context("Failed to compile command table")?,
    );
    let authorizer = Authorizer::from_config(&config.auth);

    // 4. Client factory strategy
    let http = http_client(config.heroku.timeout).context("Failed to create HTTP client")?;
    let (clients, credentials): (Arc<dyn ClientFactory>, Option<Arc<dyn CredentialStore>>) =
        match config.heroku.credentials {
            CredentialMode::Global => {
                tracing::info!("{}", logs::credential_mode("global"));
                let key = config.heroku.resolve_api_key()?;
                let client = HttpHerokuClient::new(http, &config.heroku.api_url, &key);
                (Arc::new(GlobalKeyFactory::new(Arc::new(client))), None)
            }
            CredentialMode::PerUser => {
                tracing::info!("{}", logs::credential_mode("per_user"));
                let store: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::open(
                    &paths::credentials_path(&config.system.data_dir),
                )?);
                (
                    Arc::new(PerUserFactory::new(http, &config.heroku.api_url, store.clone())),
                    Some(store),
                )
            }
        };

    let orchestrator = Orchestrator::new(
        table.clone(),
        authorizer,
        clients,
        credentials,
        config.commands.clone(),
    );

    // 5. Surface
    if args.console {
        let router = Arc::new(CommandRouter::new(
            table,
            orchestrator,
            console::CONSOLE_SURFACE,
        ));
        println!("{}", logs::CONSOLE_READY);
        return console::run(router, &args.user).await;
    }

    let matrix = config
        .services
        .matrix
        .clone()
        .context(logs::MATRIX_CONFIG_MISSING)?;
    let router = Arc::new(CommandRouter::new(table, orchestrator, &config.bot.surface));
    run_matrix(&matrix, router).await
}

async fn run_matrix(matrix: &MatrixConfig, router: Arc<CommandRouter>) -> Result<()> {
    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await
        .context("Failed to build Matrix client")?;

    client
        .matrix_auth()
        .login_username(&matrix.username, &matrix.password)
        .send()
        .await
        .context("Matrix login failed")?;

    tracing::info!("{}", logs::logged_in(&matrix.username));

    if let Some(name) = &matrix.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name)).await {
            tracing::warn!("Failed to set display name: {}", e);
        }
    }

    let start_time = std::time::SystemTime::now();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = router.clone();

        async move {
            let Some(original) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let event_time = std::time::UNIX_EPOCH
                + std::time::Duration::from_millis(ev.origin_server_ts().get().into());
            if event_time < start_time {
                return;
            }

            if original.sender == room.own_user_id() {
                return;
            }

            let Some(message) = inbound_from_event(original) else {
                return;
            };

            // One task per event so a slow command never holds up the next one.
            let chat: Arc<dyn ChatProvider> = Arc::new(MatrixService::new(room));
            tokio::spawn(async move {
                router.route(chat, message).await;
            });
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            if let Err(e) = room.join().await {
                tracing::warn!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    client
        .sync(SyncSettings::default())
        .await
        .map_err(|e| anyhow::anyhow!(logs::sync_loop_fail(&e.to_string())))
}
