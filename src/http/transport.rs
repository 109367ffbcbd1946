use std::time::Duration;

use reqwest::Client;

use crate::config::settings::ConnectorConfig;
use crate::error::{ConnectorError, Result};

/// Build the one shared HTTP client for the connector lifetime.
///
/// The cookie jar carries the CSRF cookie from the status call into the login
/// POST. Connect/read timeouts come from config, so a hung server surfaces as
/// `Timeout` instead of blocking a provisioning thread forever.
pub fn build_http_client(config: &ConnectorConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .timeout(Duration::from_millis(config.read_timeout_ms))
        .cookie_store(true)
        .danger_accept_invalid_certs(config.trust_all_certs)
        .build()
        .map_err(|err| ConnectorError::Transport {
            status: 0,
            body: format!("failed to build HTTP client: {}", err),
        })
}
