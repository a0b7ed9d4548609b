//! # Credential Stores
//!
//! Per-user Heroku tokens keyed by chat identity. `FileCredentialStore` keeps them in
//! `<data_dir>/credentials.json` and rewrites the file on every change;
//! `MemoryCredentialStore` lives only as long as the process.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::domain::traits::CredentialStore;

pub struct FileCredentialStore {
    path: PathBuf,
    tokens: Mutex<HashMap<String, String>>,
}

impl FileCredentialStore {
    /// Opens the store at `path`, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let tokens = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            tokens: Mutex::new(tokens),
        })
    }

    fn save(&self, tokens: &HashMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = serde_json::to_string_pretty(tokens).map_err(|e| e.to_string())?;
        fs::write(&self.path, content).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, requester: &str) -> Result<Option<String>, String> {
        Ok(self.tokens.lock().await.get(requester).cloned())
    }

    // Memory only changes once the file holds the new map.
    async fn set(&self, requester: &str, token: &str) -> Result<(), String> {
        let mut tokens = self.tokens.lock().await;
        let mut next = tokens.clone();
        next.insert(requester.to_string(), token.to_string());
        self.save(&next)?;
        *tokens = next;
        Ok(())
    }

    async fn remove(&self, requester: &str) -> Result<(), String> {
        let mut tokens = self.tokens.lock().await;
        if !tokens.contains_key(requester) {
            return Ok(());
        }
        let mut next = tokens.clone();
        next.remove(requester);
        self.save(&next)?;
        *tokens = next;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    tokens: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, requester: &str) -> Result<Option<String>, String> {
        Ok(self.tokens.lock().await.get(requester).cloned())
    }

    async fn set(&self, requester: &str, token: &str) -> Result<(), String> {
        self.tokens
            .lock()
            .await
            .insert(requester.to_string(), token.to_string());
        Ok(())
    }

    async fn remove(&self, requester: &str) -> Result<(), String> {
        self.tokens.lock().await.remove(requester);
        Ok(())
    }
}
