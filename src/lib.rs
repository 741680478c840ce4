//! Layered configuration loading and validation for the remote service proxy.

pub mod config;
pub mod observability;

pub use config::{load_config, Config, ConfigError, ConfigSources, Platform};
