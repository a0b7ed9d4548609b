//! # Release Commands
//!
//! Handles `heroku releases` and `heroku rollback`.

use serde_json::json;

use super::{CommandContext, app_path};
use crate::domain::errors::CommandError;
use crate::domain::types::Release;
use crate::strings::messages;

/// Most recent releases first, at most ten of them.
const RECENT_RELEASES_RANGE: &str = "version ..; order=desc, max=10";
const RECENT_RELEASES: usize = 10;

pub async fn handle_releases(ctx: &CommandContext<'_>, app: &str) -> Result<(), CommandError> {
    ctx.channel.send(&messages::getting_releases(app)).await;

    let releases = ctx
        .api
        .get(
            &format!("{}/releases", app_path(app)),
            Some(RECENT_RELEASES_RANGE),
        )
        .await?;
    let releases: Vec<Release> = serde_json::from_value(releases)?;

    ctx.channel.send(&render_releases(app, releases)).await;
    Ok(())
}

/// Sorts descending by version and keeps the ten newest.
pub fn render_releases(app: &str, mut releases: Vec<Release>) -> String {
    releases.sort_by(|a, b| b.version.cmp(&a.version));
    releases.truncate(RECENT_RELEASES);

    let mut output = vec![messages::releases_header(app)];
    output.extend(releases.iter().map(|release| {
        format!(
            "v{} - {} - {} - {}",
            release.version,
            release.description,
            release.user.as_ref().map(|u| u.email.as_str()).unwrap_or(""),
            release.created_at
        )
    }));
    output.join("\n")
}

pub async fn handle_rollback(
    ctx: &CommandContext<'_>,
    app: &str,
    version: &str,
) -> Result<(), CommandError> {
    ctx.channel.send(&messages::rolling_back(version)).await;

    let releases_path = format!("{}/releases", app_path(app));
    let releases = ctx.api.get(&releases_path, None).await?;
    let releases: Vec<Release> = serde_json::from_value(releases)?;

    let target = releases
        .iter()
        .find(|release| format!("v{}", release.version).eq_ignore_ascii_case(version))
        .ok_or_else(|| CommandError::NotFound(messages::version_not_found(version, app)))?;

    let created = ctx
        .api
        .post(&releases_path, json!({ "release": target.id }))
        .await?;
    let created: Release = serde_json::from_value(created)?;

    ctx.channel
        .send(&messages::rollback_success(created.version, version))
        .await;
    Ok(())
}
