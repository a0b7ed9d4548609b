//! # Config Var Commands
//!
//! Handles `heroku config`, `heroku config:set` and `heroku config:unset`.
//! Values are never shown except the one the server stores on a set.

use serde_json::{Map, Value};

use super::{CommandContext, app_path};
use crate::application::formatter::display_value;
use crate::domain::errors::CommandError;
use crate::strings::messages;

fn config_vars_path(app: &str) -> String {
    format!("{}/config-vars", app_path(app))
}

pub async fn handle_config_keys(ctx: &CommandContext<'_>, app: &str) -> Result<(), CommandError> {
    ctx.channel.send(&messages::getting_config_keys(app)).await;

    let vars = ctx.api.get(&config_vars_path(app), None).await?;
    let vars: Map<String, Value> = serde_json::from_value(vars)?;

    let keys: Vec<&str> = vars.keys().map(String::as_str).collect();
    ctx.channel.send(&keys.join(", ")).await;
    Ok(())
}

pub async fn handle_config_set(
    ctx: &CommandContext<'_>,
    app: &str,
    key: &str,
    value: &str,
) -> Result<(), CommandError> {
    ctx.channel.send(&messages::setting_config(key)).await;

    let mut body = Map::new();
    body.insert(key.to_string(), Value::String(value.to_string()));
    let stored = ctx
        .api
        .patch(&config_vars_path(app), Value::Object(body))
        .await?;

    // Echo what Heroku kept, not what was sent.
    let stored = stored.get(key).map(display_value).unwrap_or_default();
    ctx.channel.send(&messages::config_set(key, &stored)).await;
    Ok(())
}

pub async fn handle_config_unset(
    ctx: &CommandContext<'_>,
    app: &str,
    key: &str,
) -> Result<(), CommandError> {
    ctx.channel.send(&messages::unsetting_config(key)).await;

    let mut body = Map::new();
    body.insert(key.to_string(), Value::Null);
    ctx.api
        .patch(&config_vars_path(app), Value::Object(body))
        .await?;

    ctx.channel.send(&messages::config_unset(key)).await;
    Ok(())
}
