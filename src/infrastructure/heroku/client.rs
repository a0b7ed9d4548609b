//! Heroku Platform API client over HTTPS.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, RANGE};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

use crate::domain::errors::ApiError;
use crate::domain::traits::HerokuApi;

const HEROKU_ACCEPT: &str = "application/vnd.heroku+json; version=3";

/// Builds the shared HTTP client used for every Heroku request.
pub fn http_client(timeout_secs: u64) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

#[derive(Clone)]
pub struct HttpHerokuClient {
    http: Client,
    base_url: String,
    token: String,
}

impl HttpHerokuClient {
    pub fn new(http: Client, base_url: &str, token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        range: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::info!("Heroku {} {}", method, path);

        let mut builder = self
            .http
            .request(method, &url)
            .header(ACCEPT, HEROKU_ACCEPT)
            .bearer_auth(&self.token);
        if let Some(range) = range {
            builder = builder.header(RANGE, range);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Unable to read response: {}", e)))?;

        // 206 Partial Content is the normal answer to a ranged list.
        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            ApiError::new(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }
}

/// Heroku errors carry a human readable `message` field; fall back to the raw body.
fn error_from_body(status: u16, text: &str) -> ApiError {
    let message = serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|json| json.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                text.trim().to_string()
            }
        });
    ApiError::new(status, message)
}

#[async_trait]
impl HerokuApi for HttpHerokuClient {
    async fn get(&self, path: &str, range: Option<&str>) -> Result<Value, ApiError> {
        self.request(Method::GET, path, range, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, None, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(Method::PATCH, path, None, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None, None).await
    }
}
