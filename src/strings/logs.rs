pub const STARTING: &str = "Starting dynobot...";
pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";
pub const MATRIX_CONFIG_MISSING: &str = "services.matrix is not configured; use --console to run without a chat service";
pub const CONSOLE_READY: &str = "Console mode: type commands, Ctrl-D to quit";

pub fn config_read_error(path: &str) -> String {
    format!("Failed to read {path}")
}

pub fn api_key_missing(env: &str) -> String {
    format!("No Heroku API key: set heroku.api_key or the {env} environment variable")
}

pub fn logged_in(user: &str) -> String {
    format!("Logged in as {user}")
}

pub fn setting_display_name(name: &str) -> String {
    format!("Setting display name to: {name}")
}

pub fn credential_mode(mode: &str) -> String {
    format!("Heroku credentials mode: {mode}")
}

/// Message bodies may carry tokens or config values, so only the id is logged.
pub fn received_message(sender: &str, message_id: &str) -> String {
    format!("Received message {message_id} from {sender}")
}

pub fn sending_reply(room: &str, length: usize) -> String {
    format!("Bot sending message to {room} ({length} chars)")
}

pub fn sync_loop_fail(err: &str) -> String {
    format!("Matrix sync failed: {err}")
}

pub fn join_invite_fail(err: &str) -> String {
    format!("Failed to join room after invite: {err}")
}
