//! # App Commands
//!
//! Handles `heroku list apps` and `heroku info`.

use serde_json::Value;

use super::CommandContext;
use crate::application::formatter::{APP_INFO, APP_SHORT_INFO, render_resource};
use crate::domain::errors::CommandError;
use crate::domain::types::App;
use crate::strings::messages;

pub async fn handle_list_apps(
    ctx: &CommandContext<'_>,
    filter: Option<&str>,
) -> Result<(), CommandError> {
    match filter {
        Some(filter) => ctx.channel.send(&messages::listing_apps_matching(filter)).await,
        None => ctx.channel.send(messages::LISTING_ALL_APPS).await,
    }

    let apps = ctx.api.get("/apps", None).await?;
    let apps: Vec<Value> = serde_json::from_value(apps)?;

    let needle = filter.map(str::to_lowercase);
    let mut rendered = Vec::new();
    for app in &apps {
        let summary: App = serde_json::from_value(app.clone())?;
        let keep = needle
            .as_deref()
            .is_none_or(|needle| summary.name.to_lowercase().contains(needle));
        if keep {
            rendered.push(render_resource(app, APP_SHORT_INFO));
        }
    }

    if rendered.is_empty() {
        ctx.channel.send(messages::NO_APPS_FOUND).await;
    } else {
        ctx.channel.send(&rendered.join("\n\n")).await;
    }
    Ok(())
}

pub async fn handle_info(ctx: &CommandContext<'_>, app: &str) -> Result<(), CommandError> {
    ctx.channel.send(&messages::getting_app_info(app)).await;

    let info = ctx.api.get(&super::app_path(app), None).await?;
    ctx.channel
        .send(&format!("\n{}", render_resource(&info, APP_INFO)))
        .await;
    Ok(())
}
