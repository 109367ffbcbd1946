//! # DSpace Connector Library
//!
//! Provisioning client for a DSpace-style REST identity repository
//! (epersons, groups, items). Keeps a CSRF+bearer session fresh across
//! concurrent operations without redundant logins, and maps HTTP CRUD
//! against the repository's metadata-array JSON onto flat resources.
//!
//! Modules:
//! - `config` — connector configuration and secret handling
//! - `session` — session value and single-flight token manager
//! - `http` — shared transport and the authenticated request executor
//! - `resource` — resource/page types and the wire codec
//! - `filter` — equality-filter to query-string translation

pub mod config;
pub mod connector;
pub mod error;
pub mod filter;
pub mod http;
pub mod resource;
pub mod session;
pub mod tests;
pub mod utils;

pub use crate::config::settings::{ConnectorConfig, LogFormat, LoggingConfig, Secret};
pub use crate::connector::Connector;
pub use crate::error::{ConnectorError, Result};
pub use crate::filter::Filter;
pub use crate::resource::types::{Page, Resource, ResourceKind};

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with the desired config.
pub fn init_logging(cfg: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&cfg.level).unwrap_or_else(|_| EnvFilter::new("debug"));

    // Base layer: filter + writer
    let registry = tracing_subscriber::registry().with(env_filter);

    // Choose format layer
    match cfg.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .flatten_event(true) // flattens fields — good for CRI log parsers
                .with_ansi(false); // CRI parsers dislike ANSI color codes

            let _ = registry.with(layer).try_init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(true);

            let _ = registry.with(layer).try_init();
        }
    };
}
