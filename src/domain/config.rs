//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the chat service, the Heroku connection, authorization and command settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub heroku: HerokuConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| crate::strings::logs::config_read_error(&path.display().to_string()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context(crate::strings::logs::CONFIG_PARSE_ERROR)
    }
}

/// Configuration for the connected chat services.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ServicesConfig {
    #[serde(default)]
    pub matrix: Option<MatrixConfig>,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// How the bot is addressed and which chat surface it answers on.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_surface")]
    pub surface: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: None,
            surface: default_surface(),
        }
    }
}

fn default_surface() -> String {
    "matrix".to_string()
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialMode {
    /// One process-wide API key shared by every requester.
    #[default]
    Global,
    /// Each requester logs in with their own token.
    PerUser,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HerokuConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub credentials: CredentialMode,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Transport timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for HerokuConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            credentials: CredentialMode::default(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout: default_timeout(),
        }
    }
}

impl HerokuConfig {
    /// Resolves the global API key, preferring the inline value over the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.api_key_env)
            .with_context(|| crate::strings::logs::api_key_missing(&self.api_key_env))
    }
}

fn default_api_url() -> String {
    "https://api.heroku.com".to_string()
}

fn default_api_key_env() -> String {
    "HEROKU_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub admins: Vec<String>,
    /// Role name -> user ids holding it.
    #[serde(default)]
    pub roles: HashMap<String, Vec<String>>,
}

/// What to do with a rollback whose version is not shaped like `v<digits>`.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MalformedVersionPolicy {
    #[default]
    Silent,
    Reject,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandsConfig {
    #[serde(default = "default_runners")]
    pub runners: Vec<String>,
    #[serde(default = "default_migrate_command")]
    pub migrate_command: String,
    #[serde(default)]
    pub malformed_version: MalformedVersionPolicy,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            runners: default_runners(),
            migrate_command: default_migrate_command(),
            malformed_version: MalformedVersionPolicy::default(),
        }
    }
}

fn default_runners() -> Vec<String> {
    vec!["rake".to_string(), "thor".to_string()]
}

fn default_migrate_command() -> String {
    "rake db:migrate".to_string()
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}
