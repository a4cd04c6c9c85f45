//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (HTTP_HOST, HTTP_PORT, ...)
//!     → EdgeConfig (immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so running with no config file works

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::EdgeConfig;
