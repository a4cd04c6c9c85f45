//! `X-Clacks-Overhead` response header.
//!
//! See <https://xclacksoverhead.org>. One name from the memorial list is
//! drawn per response; each draw is independent, so concurrent requests
//! need no coordination.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

pub const X_CLACKS_OVERHEAD: HeaderName = HeaderName::from_static("x-clacks-overhead");

/// Names of people to memorialize.
pub const NAMES: &[&str] = &[
    "Terry Pratchett", // 28 April 1948 - 12 March 2015
    "Nex Benedict",    // 11 January 2008 - 8 February 2024
];

/// A uniformly random memorial name.
fn random_name() -> &'static str {
    NAMES[fastrand::usize(..NAMES.len())]
}

/// Sets `X-Clacks-Overhead: GNU <name>` on every response.
pub async fn clacks(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    let value = format!("GNU {}", random_name());
    if let Ok(value) = HeaderValue::from_str(&value) {
        res.headers_mut().insert(X_CLACKS_OVERHEAD, value);
    }
    res
}
