//! Configuration schema definitions.
//!
//! All types derive Serde traits and default field-by-field, so an empty
//! config file (or none at all) yields a working server.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the edge responder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EdgeConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Static content configuration.
    pub content: ContentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Startup self-check settings.
    pub self_check: SelfCheckConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Bind port.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

impl ListenerConfig {
    /// The address to hand to `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the pre-built static site lives.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root directory of the static output tree.
    pub root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dist"),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Startup self-check settings.
///
/// When enabled, the server probes the external targets its redirects point
/// at and logs unreachable ones. Off by default so tests and CI never touch
/// the network.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SelfCheckConfig {
    /// Whether to run network-reachability probes at startup.
    pub enabled: bool,
}
