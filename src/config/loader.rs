//! Configuration loading from disk and environment.

use std::env;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EdgeConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {name} value: {value}")]
    Env { name: &'static str, value: String },
}

/// Load configuration: TOML file (when given) under environment overrides.
///
/// Recognized variables: `HTTP_HOST`, `HTTP_PORT`, `CONTENT_ROOT`,
/// `RUN_SELF_CHECKS`. Environment wins over file, file wins over defaults.
pub fn load_config(path: Option<&Path>) -> Result<EdgeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => EdgeConfig::default(),
    };
    apply_env(&mut config)?;
    Ok(config)
}

fn apply_env(config: &mut EdgeConfig) -> Result<(), ConfigError> {
    if let Ok(host) = env::var("HTTP_HOST") {
        config.listener.host = host;
    }
    if let Ok(port) = env::var("HTTP_PORT") {
        config.listener.port = port.parse().map_err(|_| ConfigError::Env {
            name: "HTTP_PORT",
            value: port,
        })?;
    }
    if let Ok(root) = env::var("CONTENT_ROOT") {
        config.content.root = root.into();
    }
    if let Ok(flag) = env::var("RUN_SELF_CHECKS") {
        config.self_check.enabled = match flag.as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(ConfigError::Env {
                    name: "RUN_SELF_CHECKS",
                    value: flag,
                })
            }
        };
    }
    Ok(())
}
