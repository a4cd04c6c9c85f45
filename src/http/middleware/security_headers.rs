//! Security headers on every response.
//!
//! Most values are fixed strings. `Content-Security-Policy` is the exception:
//! its `script-src-elem` names the XSL stylesheets for the RSS feed and the
//! sitemap, which browsers load as if they were scripts. Those must be
//! same-origin, and the origin differs between local development and
//! production, so the directive is computed per request from the Host header.

use axum::extract::Request;
use axum::http::{header, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::identity::SITE_ORIGIN;

// Standard headers the http crate has no constants for yet:
const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");
const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");
const X_DOWNLOAD_OPTIONS: HeaderName = HeaderName::from_static("x-download-options");
const X_PERMITTED_CROSS_DOMAIN_POLICIES: HeaderName =
    HeaderName::from_static("x-permitted-cross-domain-policies");

const HSTS: &str = "max-age=31536000; includeSubDomains; preload";

const PERMISSIONS: &str = "accelerometer=(), ambient-light-sensor=(), autoplay=(), battery=(), camera=(), clipboard-read=(), clipboard-write=(), cross-origin-isolated=(), display-capture=(), document-domain=(), encrypted-media=(), execution-while-not-rendered=(), execution-while-out-of-viewport=(), fullscreen=*, gamepad=(), geolocation=(), gyroscope=(), identity-credentials-get=(), idle-detection=(), interest-cohort=(), keyboard-map=(), local-fonts=(), magnetometer=(), microphone=(), midi=(), navigation-override=(), payment=(), picture-in-picture=*, publickey-credentials-create=(), publickey-credentials-get=(), screen-wake-lock=(), serial=(), speaker-selection=(), storage-access=(), sync-xhr=(), usb=(), web-share=*, xr-spatial-tracking=()";

/// Sets the full security-header suite on every response.
pub async fn security_headers(req: Request, next: Next) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let mut res = next.run(req).await;
    let headers = res.headers_mut();

    let csp = content_security_policy(host.as_deref());
    if let Ok(value) = HeaderValue::from_str(&csp) {
        headers.insert(header::CONTENT_SECURITY_POLICY, value);
    }

    headers.insert(
        CROSS_ORIGIN_EMBEDDER_POLICY,
        HeaderValue::from_static("require-corp"),
    );
    headers.insert(
        CROSS_ORIGIN_OPENER_POLICY,
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        CROSS_ORIGIN_RESOURCE_POLICY,
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static(HSTS),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::X_DNS_PREFETCH_CONTROL,
        HeaderValue::from_static("off"),
    );
    headers.insert(X_DOWNLOAD_OPTIONS, HeaderValue::from_static("noopen"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        X_PERMITTED_CROSS_DOMAIN_POLICIES,
        HeaderValue::from_static("none"),
    );
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("0"));
    headers.insert(PERMISSIONS_POLICY, HeaderValue::from_static(PERMISSIONS));

    res
}

fn content_security_policy(host: Option<&str>) -> String {
    let origin = resource_origin(host);
    format!(
        "base-uri 'none'; default-src 'none'; form-action 'self'; \
         frame-ancestors 'none'; img-src 'self' https://* data:; \
         sandbox allow-same-origin allow-downloads allow-forms allow-scripts; \
         style-src 'self' 'unsafe-inline'; media-src 'none'; \
         script-src-elem {origin}/rss/styles.xsl {origin}/sitemap/styles.xsl; \
         upgrade-insecure-requests"
    )
}

/// Returns the origin implied by the user-provided host name. Some flavor of
/// localhost keeps its host with an `http` scheme so local styles still load;
/// anything else (or no host at all) maps to the production origin.
fn resource_origin(user_provided_host: Option<&str>) -> String {
    match user_provided_host.map(strip_port) {
        Some("localhost") => "http://localhost".to_string(),
        Some("127.0.0.1") => "http://127.0.0.1".to_string(),
        Some("[::1]") => "http://[::1]".to_string(),
        Some(_) | None => SITE_ORIGIN.to_string(),
    }
}

/// Drops a `:port` suffix from a Host header value, leaving bracketed IPv6
/// hosts intact.
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.find(']') {
        return &host[..=end];
    }
    match host.rfind(':') {
        Some(idx) => &host[..idx],
        None => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_hosts_stay_local() {
        assert_eq!(resource_origin(Some("localhost")), "http://localhost");
        assert_eq!(resource_origin(Some("localhost:8787")), "http://localhost");
        assert_eq!(resource_origin(Some("127.0.0.1:8787")), "http://127.0.0.1");
        assert_eq!(resource_origin(Some("[::1]:8787")), "http://[::1]");
    }

    #[test]
    fn unknown_hosts_map_to_production() {
        assert_eq!(resource_origin(None), "https://average.name");
        assert_eq!(resource_origin(Some("average.name")), "https://average.name");
        assert_eq!(resource_origin(Some("evil.example")), "https://average.name");
    }

    #[test]
    fn csp_names_both_stylesheets() {
        let csp = content_security_policy(Some("average.name"));
        assert!(csp.contains("script-src-elem https://average.name/rss/styles.xsl"));
        assert!(csp.contains("https://average.name/sitemap/styles.xsl"));
        assert!(csp.contains("upgrade-insecure-requests"));
    }
}
