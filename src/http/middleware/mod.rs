//! Response-transforming middleware.
//!
//! # Ordering
//! The layers wrap the router outermost-first:
//! ```text
//! trace → timeout → compression → security_headers → cache_control
//!       → pronouns → clacks → trim_slash → [per-route CORS] → handler
//! ```
//! Order is fixed at startup and significant: trailing slashes are trimmed
//! before any handler sees the path, yet `trim_slash` sits inside the
//! header layers so even its early redirect is decorated on the way out.
//! Every header-setting layer mutates the response in place, so nothing set
//! earlier is lost.

mod cache_control;
mod clacks;
pub mod cors;
mod pronouns;
mod security_headers;
mod trim_slash;

pub use cache_control::cache_control;
pub use clacks::{clacks, NAMES as CLACKS_NAMES, X_CLACKS_OVERHEAD};
pub use pronouns::{pronouns_acceptable, X_PRONOUNS_ACCEPTABLE};
pub use security_headers::security_headers;
pub use trim_slash::trim_slash;
