pub mod settings;

pub use settings::{ConnectorConfig, LogFormat, LoggingConfig, Secret};
