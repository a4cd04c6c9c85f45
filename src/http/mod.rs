//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware layering)
//!     → middleware/ (compression, slash trimming, header suites, CORS)
//!     → routes/ (redirects, discovery endpoints, static fallback)
//!     → middleware response phase (header mutation on the way out)
//! ```

pub mod middleware;
pub mod server;

pub use server::{AppState, HttpServer};
