//! # One-off Process Commands
//!
//! Handles `heroku migrate` and `heroku run`. Both start a detached one-off dyno and
//! then open a tailing log session for it; the session is only requested once the
//! dyno exists, since it needs the dyno's generated name.

use serde_json::json;

use super::{CommandContext, app_path};
use crate::domain::errors::CommandError;
use crate::domain::types::{Dyno, LogSession};
use crate::strings::messages;

pub async fn handle_migrate(ctx: &CommandContext<'_>, app: &str) -> Result<(), CommandError> {
    ctx.channel.send(&messages::migrating_request(app)).await;

    let command_line = ctx.settings.migrate_command.as_str();
    run_detached(ctx, app, command_line, &messages::migrating_started(app)).await
}

pub async fn handle_run(
    ctx: &CommandContext<'_>,
    runner: &str,
    task: &str,
    app: &str,
) -> Result<(), CommandError> {
    let command_line = format!("{runner} {task}");
    ctx.channel
        .send(&messages::run_request(&command_line, app))
        .await;
    run_detached(
        ctx,
        app,
        &command_line,
        &messages::run_started(&command_line, app),
    )
    .await
}

/// Creates the one-off dyno, reports `started`, then attaches a log session.
async fn run_detached(
    ctx: &CommandContext<'_>,
    app: &str,
    command_line: &str,
    started: &str,
) -> Result<(), CommandError> {
    let dyno = ctx
        .api
        .post(
            &format!("{}/dynos", app_path(app)),
            json!({ "command": command_line, "attach": false }),
        )
        .await?;
    let dyno: Dyno = serde_json::from_value(dyno)?;
    tracing::info!("Started one-off dyno {} on {}", dyno.name, app);

    ctx.channel.send(started).await;

    let session = ctx
        .api
        .post(
            &format!("{}/log-sessions", app_path(app)),
            json!({ "dyno": dyno.name, "tail": true }),
        )
        .await?;
    let session: LogSession = serde_json::from_value(session)?;

    ctx.channel.send(&messages::view_logs(&session.logplex_url)).await;
    Ok(())
}
