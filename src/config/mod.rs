pub mod settings;

pub use settings::{Config, ConfigError, Expectations, GitConfig, LoggingConfig};
