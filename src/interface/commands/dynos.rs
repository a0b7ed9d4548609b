//! # Dyno Commands
//!
//! Handles `heroku dynos`, `heroku restart` and `heroku ps:scale`.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use super::{CommandContext, app_path};
use crate::application::formatter::{display_value, time_ago, utc_timestamp};
use crate::domain::errors::CommandError;
use crate::domain::types::{Dyno, Formation};
use crate::strings::messages;

pub async fn handle_dynos(ctx: &CommandContext<'_>, app: &str) -> Result<(), CommandError> {
    ctx.channel.send(&messages::getting_dynos(app)).await;

    let dynos = ctx.api.get(&format!("{}/dynos", app_path(app)), None).await?;
    let dynos: Vec<Dyno> = serde_json::from_value(dynos)?;

    ctx.channel
        .send(&render_dynos(app, &dynos, &Utc::now()))
        .await;
    Ok(())
}

/// Groups consecutive dynos of the same type and size under one header.
pub fn render_dynos(app: &str, dynos: &[Dyno], now: &DateTime<Utc>) -> String {
    let mut output = vec![messages::dynos_header(app)];
    let mut last_formation: Option<(&str, &str)> = None;

    for dyno in dynos {
        let formation = (dyno.process_type.as_str(), dyno.size.as_str());
        if last_formation != Some(formation) {
            if last_formation.is_some() {
                output.push(String::new());
            }
            output.push(format!(
                "=== {} ({}): `{}`",
                dyno.process_type, dyno.size, dyno.command
            ));
            last_formation = Some(formation);
        }

        let updated = match DateTime::parse_from_rfc3339(&dyno.updated_at) {
            Ok(at) => {
                let at = at.with_timezone(&Utc);
                format!("{} (~ {})", utc_timestamp(&at), time_ago(&at, now))
            }
            Err(_) => dyno.updated_at.clone(),
        };
        output.push(format!("{}: {} {}", dyno.name, dyno.state, updated));
    }

    output.join("\n")
}

pub async fn handle_restart(
    ctx: &CommandContext<'_>,
    app: &str,
    dyno: Option<&str>,
) -> Result<(), CommandError> {
    ctx.channel.send(&messages::restarting_request(app, dyno)).await;

    let path = match dyno {
        Some(dyno) => format!("{}/dynos/{}", app_path(app), dyno),
        None => format!("{}/dynos", app_path(app)),
    };
    ctx.api.delete(&path).await?;

    ctx.channel.send(&messages::restarting_done(app, dyno)).await;
    Ok(())
}

pub async fn handle_scale(
    ctx: &CommandContext<'_>,
    app: &str,
    process_type: &str,
    quantity: u32,
    size: Option<&str>,
) -> Result<(), CommandError> {
    ctx.channel
        .send(&messages::scaling_request(process_type, app))
        .await;

    let mut body = Map::new();
    body.insert("quantity".to_string(), json!(quantity));
    if let Some(size) = size {
        body.insert("size".to_string(), json!(size));
    }

    let formation = ctx
        .api
        .patch(
            &format!("{}/formation/{}", app_path(app), process_type),
            Value::Object(body),
        )
        .await?;
    let formation: Formation = serde_json::from_value(formation)?;

    ctx.channel
        .send(&messages::scaled(
            &formation.process_type,
            &display_value(&formation.quantity),
            &formation.size,
        ))
        .await;
    Ok(())
}
