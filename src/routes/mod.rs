//! Route registration and the small dynamic handlers.
//!
//! # Dispatch discipline
//! Specific routes (the redirect table and the `.well-known` endpoints) are
//! registered ahead of the static wildcard; the router matches exactly one
//! handler per request, most-specific first, so the fallback can never
//! intercept a named route. Everything here is GET-only; other methods on a
//! matched path get 405 from the router itself.

use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::http::middleware::cors;
use crate::http::server::AppState;
use crate::identity::{HOME_INSTANCE, PRONOUNS_EN};

pub mod domains;
pub mod redirects;
pub mod statics;
pub mod webfinger;

/// Assemble every route. Per-route CORS is attached here; the global
/// middleware pipeline wraps the result in `http::server`.
pub fn router(dev_port: u16) -> Router<AppState> {
    let site_cors = cors::site(dev_port);

    // Discovery endpoints share the site-origin CORS policy.
    let discovery = Router::new()
        .route("/.well-known/webfinger", get(webfinger::webfinger))
        .route("/.well-known/nodeinfo", get(nodeinfo))
        .layer(site_cors.clone());

    // Pronouns are embeddable from anywhere.
    let pronouns = Router::new()
        .route("/.well-known/pronouns", get(well_known_pronouns))
        .layer(cors::public());

    // On-demand TLS is consumed by the reverse proxy, not browsers: no CORS.
    let tls = Router::new().route("/.well-known/domains", get(domains::on_demand_tls));

    // The wildcard static fallback, checked after everything above.
    let statics = Router::new()
        .route("/", get(statics::serve))
        .route("/{*path}", get(statics::serve))
        .layer(site_cors);

    Router::new()
        .route("/favicon.ico", get(favicon))
        .merge(redirects::routes())
        .merge(discovery)
        .merge(pronouns)
        .merge(tls)
        .merge(statics)
}

/// Favicon is always not found, even when the build output ships one.
async fn favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// `GET /.well-known/pronouns`
async fn well_known_pronouns() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{PRONOUNS_EN}\n"),
    )
}

/// `GET /.well-known/nodeinfo`
///
/// GitHub's fediverse-verification bot asks for nodeinfo here; point it at
/// the home instance. Anyone else sees nothing.
async fn nodeinfo(req: Request) -> Response {
    let from_github = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|ua| ua.to_str().ok())
        .is_some_and(|ua| ua.starts_with("GitHub-NodeinfoQuery"));

    if from_github {
        let location = format!("https://{HOME_INSTANCE}/.well-known/nodeinfo");
        match HeaderValue::from_str(&location) {
            Ok(location) => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
            Err(_) => StatusCode::NOT_FOUND.into_response(),
        }
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        router(8787).with_state(AppState::for_tests())
    }

    #[tokio::test]
    async fn pronouns_body_is_fixed() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/.well-known/pronouns")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"she/her\n");
    }

    #[tokio::test]
    async fn nodeinfo_hides_from_strangers() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/.well-known/nodeinfo")
                    .header(header::USER_AGENT, "curl/8.0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nodeinfo_answers_github() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/.well-known/nodeinfo")
                    .header(header::USER_AGENT, "GitHub-NodeinfoQuery/1.0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "https://fosstodon.org/.well-known/nodeinfo"
        );
    }
}
