//! Cache policy headers.
//!
//! The site is under active development; `Vary: *` tells caches that no two
//! requests are interchangeable, disabling caching wholesale. The compression
//! layer sits outside this one and appends its own `Vary` member rather than
//! replacing ours.

use axum::extract::Request;
use axum::http::header;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Sets `Vary: *` on every response.
pub async fn cache_control(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    res.headers_mut()
        .insert(header::VARY, HeaderValue::from_static("*"));
    res
}
