//! Strategies for obtaining a Heroku client for a requester.
//!
//! [`GlobalKeyFactory`] hands everyone the same client built from the process-wide key.
//! [`PerUserFactory`] looks the requester's own token up in a [`CredentialStore`] and
//! fails with [`CommandError::MissingCredential`] when there is none.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use super::client::HttpHerokuClient;
use crate::domain::errors::CommandError;
use crate::domain::traits::{ClientFactory, CredentialStore, HerokuApi};

pub struct GlobalKeyFactory {
    client: Arc<dyn HerokuApi>,
}

impl GlobalKeyFactory {
    pub fn new(client: Arc<dyn HerokuApi>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClientFactory for GlobalKeyFactory {
    async fn client_for(&self, _requester: &str) -> Result<Arc<dyn HerokuApi>, CommandError> {
        Ok(self.client.clone())
    }
}

pub struct PerUserFactory {
    http: Client,
    api_url: String,
    store: Arc<dyn CredentialStore>,
}

impl PerUserFactory {
    pub fn new(http: Client, api_url: &str, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            api_url: api_url.to_string(),
            store,
        }
    }
}

#[async_trait]
impl ClientFactory for PerUserFactory {
    async fn client_for(&self, requester: &str) -> Result<Arc<dyn HerokuApi>, CommandError> {
        let token = self
            .store
            .get(requester)
            .await
            .map_err(CommandError::CredentialStore)?
            .ok_or(CommandError::MissingCredential)?;

        Ok(Arc::new(HttpHerokuClient::new(
            self.http.clone(),
            &self.api_url,
            &token,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::credentials::MemoryCredentialStore;
    use crate::infrastructure::heroku::client::http_client;
    use crate::testing::ScriptedApi;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_global_factory_shares_one_client() {
        let api: Arc<dyn HerokuApi> = Arc::new(ScriptedApi::new());
        let factory = GlobalKeyFactory::new(api.clone());

        let a = factory.client_for("@a:example.org").await.unwrap();
        let b = factory.client_for("@b:example.org").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_per_user_factory_requires_login() {
        let store = Arc::new(MemoryCredentialStore::default());
        let factory = PerUserFactory::new(http_client(5).unwrap(), "http://localhost", store);

        match factory.client_for("@damon:example.org").await {
            Err(CommandError::MissingCredential) => {}
            Err(other) => panic!("expected missing credential, got {other:?}"),
            Ok(_) => panic!("expected missing credential"),
        }
    }

    #[tokio::test]
    async fn test_per_user_factory_uses_requesters_token() {
        let server = MockServer::start_async().await;
        let apps = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/apps")
                    .header("authorization", "Bearer damons-token");
                then.status(200).json_body(json!([]));
            })
            .await;

        let store = Arc::new(MemoryCredentialStore::default());
        store.set("@damon:example.org", "damons-token").await.unwrap();
        let factory = PerUserFactory::new(http_client(5).unwrap(), &server.base_url(), store);

        let api = factory.client_for("@damon:example.org").await.unwrap();
        api.get("/apps", None).await.unwrap();
        apps.assert_async().await;
    }
}
