use std::sync::Arc;

use http::Method;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{classify_status, Result};
use crate::session::manager::TokenManager;

/// Executes one logical API operation with authentication attached and turns
/// transport/status results into the error taxonomy.
pub struct RequestExecutor {
    client: Client,
    tokens: Arc<TokenManager>,
    base: String,
}

impl RequestExecutor {
    pub fn new(client: Client, tokens: Arc<TokenManager>, base: String) -> Self {
        Self {
            client,
            tokens,
            base,
        }
    }

    /// Send `method path` with a fresh bearer attached and classify the
    /// result. On an authorization failure the session is invalidated and the
    /// identical request is resent exactly once; a second rejection is
    /// terminal.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<String> {
        let token = self.tokens.valid_token().await?;
        match self.send(&method, path, body, &token).await {
            Err(err) if err.is_authentication() => {
                warn!("authorization failure on {}, renewing session once", path);
                self.tokens.invalidate().await;
                let token = self.tokens.valid_token().await?;
                // no third attempt, ever
                self.send(&method, path, body, &token).await
            }
            outcome => outcome,
        }
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        token: &str,
    ) -> Result<String> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.client.request(method.clone(), &url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("{} {} -> {}", method, path, status);
        classify_status(status, path, &text)?;
        Ok(text)
    }
}
