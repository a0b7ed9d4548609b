//! # Auth Commands
//!
//! Handles `heroku auth:login` and `heroku auth:logout` in per-user credential mode.

use crate::application::responder::ResponseChannel;
use crate::domain::errors::CommandError;
use crate::domain::traits::CredentialStore;
use crate::strings::messages;

pub async fn handle_login(
    store: &dyn CredentialStore,
    channel: &ResponseChannel,
    requester: &str,
    token: &str,
) -> Result<(), CommandError> {
    store
        .set(requester, token)
        .await
        .map_err(CommandError::CredentialStore)?;
    tracing::info!("Stored Heroku token for {}", requester);
    channel.send(&messages::token_saved(requester)).await;
    Ok(())
}

pub async fn handle_logout(
    store: &dyn CredentialStore,
    channel: &ResponseChannel,
    requester: &str,
) -> Result<(), CommandError> {
    store
        .remove(requester)
        .await
        .map_err(CommandError::CredentialStore)?;
    tracing::info!("Removed Heroku token for {}", requester);
    channel.send(&messages::token_removed(requester)).await;
    Ok(())
}
