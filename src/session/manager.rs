use std::sync::Arc;

use chrono::Utc;
use reqwest::header::{HeaderMap, AUTHORIZATION, SET_COOKIE};
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::settings::ConnectorConfig;
use crate::error::{ConnectorError, Result};
use crate::session::session::Session;
use crate::utils::constants::{
    AUTHN_LOGIN_PATH, AUTHN_STATUS_PATH, BEARER_PREFIX, CSRF_COOKIE, CSRF_HEADER,
    CSRF_REQUEST_HEADER,
};

/// Single owner of the session. Every authenticated request goes through
/// `valid_token`; nothing else may read or replace the session.
pub struct TokenManager {
    client: Client,
    config: Arc<ConnectorConfig>,
    session: RwLock<Session>,
    renewal: Mutex<()>,
}

impl TokenManager {
    /// The transport is injected once for the connector lifetime, never built
    /// per call.
    pub fn new(client: Client, config: Arc<ConnectorConfig>) -> Self {
        Self {
            client,
            config,
            session: RwLock::new(Session::empty()),
            renewal: Mutex::new(()),
        }
    }

    /// Return a bearer token fresh at the time of the check.
    ///
    /// Double-checked renewal: callers observing a stale session line up on
    /// the renewal lock, and whoever acquires it first performs the one
    /// handshake; the rest re-check and reuse its result.
    pub async fn valid_token(&self) -> Result<String> {
        {
            let session = self.session.read().await;
            if session.is_fresh() {
                return Ok(session.bearer_token.clone());
            }
        }

        let _guard = self.renewal.lock().await;
        {
            let session = self.session.read().await;
            if session.is_fresh() {
                debug!("session already renewed by a concurrent caller");
                return Ok(session.bearer_token.clone());
            }
        }

        let renewed = self.renew().await?;
        let token = renewed.bearer_token.clone();
        *self.session.write().await = renewed;
        Ok(token)
    }

    /// Force the next `valid_token` to renew. Called by the executor after an
    /// authorization failure.
    pub async fn invalidate(&self) {
        self.session.write().await.invalidate();
    }

    /// Two-step handshake: status call yields the CSRF token, login POST
    /// yields the bearer. The stored session is replaced only on full
    /// success; a failed attempt leaves it as it was (still stale).
    async fn renew(&self) -> Result<Session> {
        let base = self.config.base();

        // step 1: CSRF token from the status endpoint
        let status_url = format!("{}{}", base, AUTHN_STATUS_PATH);
        let response = self.client.get(&status_url).send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(ConnectorError::Authentication {
                message: format!("status call failed with {}", status),
                status: Some(status),
            });
        }
        let csrf = extract_csrf(response.headers()).ok_or_else(|| {
            ConnectorError::Authentication {
                message: "csrf token missing".to_owned(),
                status: None,
            }
        })?;
        debug!("csrf token obtained ({} chars)", csrf.len());

        // step 2: login; the bearer comes back in the Authorization header
        let login_url = format!("{}{}", base, AUTHN_LOGIN_PATH);
        let form = [
            ("user", self.config.username.as_str()),
            ("password", self.config.password.expose()),
        ];
        let response = self
            .client
            .post(&login_url)
            .header(CSRF_REQUEST_HEADER, &csrf)
            .form(&form)
            .send()
            .await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(ConnectorError::Authentication {
                message: "login rejected".to_owned(),
                status: Some(status),
            });
        }
        let bearer = response
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| ConnectorError::Authentication {
                message: "authorization header missing".to_owned(),
                status: None,
            })?;

        let lifetime = self
            .config
            .session_lifetime_secs
            .saturating_sub(self.config.safety_margin_secs);
        let expires_at = Utc::now().timestamp() + lifetime as i64;
        info!(
            "session renewed for '{}', valid {}s",
            self.config.username, lifetime
        );
        Ok(Session::new(csrf, bearer, expires_at))
    }
}

/// CSRF token from the response header, falling back to the Set-Cookie form.
fn extract_csrf(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok()) {
        if !value.is_empty() {
            return Some(value.to_owned());
        }
    }
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|cookie| {
            let rest = cookie.strip_prefix(CSRF_COOKIE)?.strip_prefix('=')?;
            let value = rest.split(';').next().unwrap_or("").trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_owned())
            }
        })
}
