//! CORS layers for specific route groups.
//!
//! CORS is not global: discovery endpoints and static content admit only the
//! site's own origin (plus localhost during development), while publicly
//! embeddable resources admit any origin. Redirects and the on-demand-TLS
//! endpoint carry no CORS headers at all.

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::identity::SITE_ORIGIN;

/// CORS restricted to the site's own origin and the local dev origin.
pub fn site(port: u16) -> CorsLayer {
    let mut origins = vec![HeaderValue::from_static(SITE_ORIGIN)];
    if let Ok(dev) = HeaderValue::from_str(&format!("http://localhost:{port}")) {
        origins.push(dev);
    }
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// CORS that permits any origin, for publicly embeddable resources.
pub fn public() -> CorsLayer {
    CorsLayer::new().allow_origin(Any)
}
