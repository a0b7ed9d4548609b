//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes progress notices, command results and rejection texts.

pub const LISTING_ALL_APPS: &str = "Listing all apps available...";
pub const NO_APPS_FOUND: &str = "No apps found";
pub const HELP_HEADER: &str = "Available commands:";
pub const NOT_LOGGED_IN: &str =
    "You are not logged in to Heroku. Use `heroku auth:login <api-token>` first.";

pub fn access_denied(role: &str) -> String {
    format!("Access denied. You must have this role to use this command: {role}")
}

pub fn remote_failure(error: &crate::domain::errors::ApiError) -> String {
    format!("Shucks. An error occurred. {error}")
}

pub fn listing_apps_matching(filter: &str) -> String {
    format!("Listing apps matching: {filter}")
}

pub fn getting_app_info(app: &str) -> String {
    format!("Getting information about {app}")
}

pub fn getting_dynos(app: &str) -> String {
    format!("Getting dynos of {app}")
}

pub fn dynos_header(app: &str) -> String {
    format!("Dynos of {app}")
}

pub fn getting_releases(app: &str) -> String {
    format!("Getting recent releases for {app}")
}

pub fn releases_header(app: &str) -> String {
    format!("Recent releases of {app}")
}

pub fn rolling_back(version: &str) -> String {
    format!("Rolling back to {version}")
}

pub fn rollback_success(new_version: u64, target: &str) -> String {
    format!("Success! v{new_version} -> Rollback to {target}")
}

pub fn version_not_found(version: &str, app: &str) -> String {
    format!("Version {version} not found for {app}")
}

pub fn malformed_version(version: &str) -> String {
    format!("`{version}` is not a release version. Versions look like v42.")
}

fn restart_target(app: &str, dyno: Option<&str>) -> String {
    match dyno {
        Some(dyno) => format!("{app} {dyno}"),
        None => app.to_string(),
    }
}

pub fn restarting_request(app: &str, dyno: Option<&str>) -> String {
    format!("Telling Heroku to restart {}", restart_target(app, dyno))
}

pub fn restarting_done(app: &str, dyno: Option<&str>) -> String {
    format!("Heroku: Restarting {}", restart_target(app, dyno))
}

pub fn migrating_request(app: &str) -> String {
    format!("Telling Heroku to migrate {app}")
}

pub fn migrating_started(app: &str) -> String {
    format!("Heroku: Running migrations for {app}")
}

pub fn run_request(command_line: &str, app: &str) -> String {
    format!("Telling Heroku to run `{command_line}` on {app}")
}

pub fn run_started(command_line: &str, app: &str) -> String {
    format!("Heroku: Running `{command_line}` for {app}")
}

pub fn view_logs(url: &str) -> String {
    format!("View logs at: {url}")
}

pub fn runner_not_allowed(runners: &[String]) -> String {
    format!("Only {} can be run", runners.join(" and "))
}

pub fn getting_config_keys(app: &str) -> String {
    format!("Getting config keys for {app}")
}

pub fn setting_config(key: &str) -> String {
    format!("Setting config {key}")
}

pub fn config_set(key: &str, stored: &str) -> String {
    format!("Heroku: {key} is set to {stored}")
}

pub fn unsetting_config(key: &str) -> String {
    format!("Unsetting config {key}")
}

pub fn config_unset(key: &str) -> String {
    format!("Heroku: {key} has been unset")
}

pub fn scaling_request(process_type: &str, app: &str) -> String {
    format!("Telling Heroku to scale {process_type} dynos of {app}")
}

pub fn scaled(process_type: &str, quantity: &str, size: &str) -> String {
    format!("Heroku: now running {process_type} at {quantity}:{size}")
}

pub fn token_saved(user: &str) -> String {
    format!("Saved a Heroku API token for {user}.")
}

pub fn token_removed(user: &str) -> String {
    format!("Removed the Heroku API token for {user}.")
}
