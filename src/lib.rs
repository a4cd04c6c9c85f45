//! Edge responder for average.name.
//!
//! Sits in front of the pre-built static site: every request passes through
//! a fixed middleware pipeline, a handful of dynamic `.well-known` endpoints
//! and a redirect table answer what they recognize, and everything else
//! falls through to static files with a custom 404 policy. TLS termination,
//! site building, and analytics all live elsewhere.

pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod routes;
pub mod selfcheck;

pub use config::EdgeConfig;
pub use error::EdgeError;
pub use http::{AppState, HttpServer};
