//! Facade wiring the session manager, executor and codec together. One
//! instance per configured repository; share it behind an `Arc` when the host
//! framework invokes operations concurrently.

use std::sync::Arc;

use http::Method;
use serde_json::Value;
use tracing::info;

use crate::config::settings::ConnectorConfig;
use crate::error::{ConnectorError, Result};
use crate::filter::{self, Filter};
use crate::http::executor::RequestExecutor;
use crate::http::transport::build_http_client;
use crate::resource::codec;
use crate::resource::types::{Page, Resource, ResourceKind};
use crate::session::manager::TokenManager;

pub struct Connector {
    executor: RequestExecutor,
    tokens: Arc<TokenManager>,
}

impl Connector {
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let client = build_http_client(&config)?;
        let tokens = Arc::new(TokenManager::new(client.clone(), config.clone()));
        let executor = RequestExecutor::new(client, tokens.clone(), config.base().to_owned());
        Ok(Self { executor, tokens })
    }

    /// Eager login check: run the handshake now instead of on first use.
    pub async fn authenticate(&self) -> Result<()> {
        self.tokens.invalidate().await;
        let _ = self.tokens.valid_token().await?;
        Ok(())
    }

    /// Raw escape hatch for the hosting layer: one authenticated request,
    /// classified, body returned as text.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<String> {
        self.executor.execute(method, path, body).await
    }

    pub async fn get(&self, kind: ResourceKind, id: &str) -> Result<Resource> {
        let body = self
            .executor
            .execute(Method::GET, &kind.item_path(id), None)
            .await?;
        codec::decode_one(&parse(&body)?)
    }

    /// List the collection, optionally narrowed by one equality filter.
    pub async fn search(&self, kind: ResourceKind, filter: Option<&Filter>) -> Result<Page> {
        let query = filter::translate(filter)?;
        let path = format!("{}{}", kind.collection_path(), query);
        let body = self.executor.execute(Method::GET, &path, None).await?;
        codec::decode_collection(&parse(&body)?, kind)
    }

    pub async fn create(&self, kind: ResourceKind, resource: &Resource) -> Result<Resource> {
        let payload = codec::encode(resource);
        let body = self
            .executor
            .execute(Method::POST, kind.collection_path(), Some(&payload))
            .await?;
        let created = codec::decode_one(&parse(&body)?)?;
        info!("created {:?} {}", kind, created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        resource: &Resource,
    ) -> Result<Resource> {
        let payload = codec::encode(resource);
        let body = self
            .executor
            .execute(Method::PUT, &kind.item_path(id), Some(&payload))
            .await?;
        codec::decode_one(&parse(&body)?)
    }

    pub async fn delete(&self, kind: ResourceKind, id: &str) -> Result<()> {
        let _ = self
            .executor
            .execute(Method::DELETE, &kind.item_path(id), None)
            .await?;
        info!("deleted {:?} {}", kind, id);
        Ok(())
    }
}

fn parse(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|err| ConnectorError::MalformedResponse {
        message: format!("invalid JSON in response: {}", err),
    })
}
