use serde::Deserialize;
use std::fmt;

use crate::error::{ConnectorError, Result};
use crate::utils::constants::{
    DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_SAFETY_MARGIN_SECS, DEFAULT_SESSION_LIFETIME_SECS,
};

/// ================================
/// Connector-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectorConfig {
    /// base address of the repository, e.g. `https://repo.example.org`
    pub base_url: String,
    pub username: String,
    pub password: Secret,
    #[serde(default = "default_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub read_timeout_ms: u64,
    #[serde(default)]
    pub trust_all_certs: bool,
    /// assumed bearer lifetime in seconds; the API returns no expiry
    #[serde(default = "default_session_lifetime_secs")]
    pub session_lifetime_secs: u64,
    /// subtracted from the lifetime so a token is never sent about to expire
    #[serde(default = "default_safety_margin_secs")]
    pub safety_margin_secs: u64,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl ConnectorConfig {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: ConnectorConfig =
            serde_yaml::from_str(raw).map_err(|err| ConnectorError::Validation {
                message: format!("config parse error: {}", err),
                status: None,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConnectorError::Validation {
                message: format!(
                    "base_url must start with http:// or https://, got '{}'",
                    self.base_url
                ),
                status: None,
            });
        }
        if self.username.is_empty() {
            return Err(ConnectorError::Validation {
                message: "username must not be empty".to_owned(),
                status: None,
            });
        }
        Ok(())
    }

    /// base address without a trailing slash, ready for path concatenation
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Write-only secret: deserializable, never printable, never serialized.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Only the login POST reads this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "json".to_string())
            .to_lowercase()
            .as_str()
        {
            "compact" | "text" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_session_lifetime_secs() -> u64 {
    DEFAULT_SESSION_LIFETIME_SECS
}

fn default_safety_margin_secs() -> u64 {
    DEFAULT_SAFETY_MARGIN_SECS
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn yaml_loader_applies_defaults() {
        let raw = r#"
base_url: "https://repo.example.org/"
username: "admin@example.org"
password: "s3cr3t"
"#;
        let config = ConnectorConfig::from_yaml(raw).expect("config should parse");
        assert_eq!(config.base(), "https://repo.example.org");
        assert_eq!(config.connect_timeout_ms, DEFAULT_HTTP_TIMEOUT_MS);
        assert_eq!(config.session_lifetime_secs, DEFAULT_SESSION_LIFETIME_SECS);
        assert_eq!(config.safety_margin_secs, DEFAULT_SAFETY_MARGIN_SECS);
        assert!(!config.trust_all_certs);
        assert_eq!(config.password.expose(), "s3cr3t");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let raw = r#"
base_url: "ftp://repo.example.org"
username: "admin"
password: "pw"
"#;
        let err = ConnectorConfig::from_yaml(raw).unwrap_err();
        assert!(matches!(err, ConnectorError::Validation { .. }));
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let raw = r#"
base_url: "http://repo"
username: "admin"
password: "hunter2"
"#;
        let config = ConnectorConfig::from_yaml(raw).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("Secret(***)"));
    }
}
