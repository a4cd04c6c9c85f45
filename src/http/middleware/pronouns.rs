//! `X-Pronouns-Acceptable` response header.
//!
//! See <https://www.andrewyu.org/article/x-pronouns.html>.

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::identity::PRONOUNS_EN;

pub const X_PRONOUNS_ACCEPTABLE: HeaderName = HeaderName::from_static("x-pronouns-acceptable");

/// Sets the language-tagged pronoun header on every response.
pub async fn pronouns_acceptable(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&format!("en:{PRONOUNS_EN}")) {
        res.headers_mut().insert(X_PRONOUNS_ACCEPTABLE, value);
    }
    res
}
