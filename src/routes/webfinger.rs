//! WebFinger resource resolution (RFC 7033).
//!
//! # Responsibilities
//! - Validate the `resource` query parameter
//! - Check host ownership against the identity record's known hosts
//! - Filter links by repeatable `rel` parameters
//! - Emit the JSON Resource Descriptor
//!
//! # Design Decisions
//! - Malformed input is 400; well-formed input we know nothing about is 404
//!   (RFC 7033 §4.2). A non-`acct:` resource is well-formed but unknown, so
//!   it gets 404 rather than 400.
//! - Pure function of the query plus the immutable identity record

use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use url::Url;

use crate::error::EdgeError;
use crate::http::server::AppState;
use crate::identity::{IdentityRecord, Link};

/// `application/jrd+json` is the JRD media type (RFC 7033 §10.2).
const JRD_CONTENT_TYPE: &str = "application/jrd+json; charset=UTF-8";

/// The response document: the fixed subject and aliases, links possibly
/// narrowed by `rel`.
#[derive(Serialize)]
struct Jrd<'a> {
    subject: &'a str,
    aliases: &'a [String],
    links: Vec<&'a Link>,
}

/// `GET /.well-known/webfinger?resource=<uri>&rel=<uri>*`
pub async fn webfinger(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, EdgeError> {
    let query = query.unwrap_or_default();

    let mut resource: Option<String> = None;
    let mut rels: Vec<String> = Vec::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            // First occurrence wins; `rel` repeats.
            "resource" if resource.is_none() => resource = Some(value.into_owned()),
            "rel" => rels.push(value.into_owned()),
            _ => {}
        }
    }

    // "If the 'resource' parameter is absent or malformed, [...] indicate
    // that the request is bad" (RFC 7033 §4.2)
    let resource = resource.filter(|r| !r.is_empty()).ok_or(EdgeError::BadRequest)?;
    let resource_uri = Url::parse(&resource).map_err(|_| EdgeError::BadRequest)?;

    // A bare scheme like `acct:` carries no account at all.
    let account = resource_uri.path();
    if account.is_empty() {
        return Err(EdgeError::BadRequest);
    }

    // We only hold records for acct: resources; anything else is a resource
    // we have no information about.
    if resource_uri.scheme() != "acct" {
        return Err(EdgeError::NotFound);
    }

    // `acct:user@host` or a bare `acct:host`; account identifiers are not
    // themselves URIs, so take the text after the last `@`.
    let host = account.rsplit('@').next().unwrap_or(account);
    if !state.identity.known_hosts().contains(&host) {
        return Err(EdgeError::NotFound);
    }

    Ok(jrd_response(&state.identity, &rels))
}

/// Builds the 200 response, narrowing links to the requested `rel` values
/// while preserving the record's original link order.
fn jrd_response(identity: &IdentityRecord, rels: &[String]) -> Response {
    let links: Vec<&Link> = identity
        .links
        .iter()
        .filter(|link| rels.is_empty() || rels.iter().any(|rel| *rel == link.rel))
        .collect();

    let doc = Jrd {
        subject: &identity.subject,
        aliases: &identity.aliases,
        links,
    };

    let body = serde_json::to_string(&doc).expect("identity record serializes");
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JRD_CONTENT_TYPE),
        )],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::http::server::AppState;

    fn app() -> Router {
        Router::new()
            .route("/.well-known/webfinger", get(webfinger))
            .with_state(AppState::for_tests())
    }

    async fn get_path(path: &str) -> axum::response::Response {
        app()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(res: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn fails_without_resource_param() {
        let res = get_path("/.well-known/webfinger").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fails_with_empty_resource_param() {
        let res = get_path("/.well-known/webfinger?resource").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let res = get_path("/.well-known/webfinger?resource=").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fails_when_resource_is_not_a_uri() {
        let res = get_path("/.well-known/webfinger?resource=foo").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fails_when_resource_is_only_a_scheme() {
        let res = get_path("/.well-known/webfinger?resource=acct:").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_acct_resources_are_unknown() {
        let res = get_path("/.well-known/webfinger?resource=https:foo.bar").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_hosts_are_not_found() {
        for resource in ["acct:foo.bar", "acct:foo@bar.baz", "acct:foo@avg.example"] {
            let res = get_path(&format!("/.well-known/webfinger?resource={resource}")).await;
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{resource}");
        }
    }

    #[tokio::test]
    async fn known_hosts_get_the_full_record() {
        for resource in [
            "acct:average.name",
            "acct:average@average.name",
            "acct:avghelper@fosstodon.org",
            "acct:fosstodon.org",
        ] {
            let res = get_path(&format!("/.well-known/webfinger?resource={resource}")).await;
            assert_eq!(res.status(), StatusCode::OK, "{resource}");
            assert_eq!(
                res.headers().get(header::CONTENT_TYPE).unwrap(),
                JRD_CONTENT_TYPE
            );
            let doc = body_json(res).await;
            assert_eq!(doc["subject"], "acct:avghelper@fosstodon.org");
            assert_eq!(doc["aliases"].as_array().unwrap().len(), 5);
            assert_eq!(doc["links"].as_array().unwrap().len(), 3);
        }
    }

    #[tokio::test]
    async fn rel_filter_narrows_links_in_order() {
        let res =
            get_path("/.well-known/webfinger?resource=acct:average@average.name&rel=self").await;
        assert_eq!(res.status(), StatusCode::OK);
        let doc = body_json(res).await;
        let links = doc["links"].as_array().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0]["rel"], "self");
        assert_eq!(links[0]["type"], "application/activity+json");
        assert_eq!(links[0]["href"], "https://fosstodon.org/users/avghelper");
    }

    #[tokio::test]
    async fn repeated_rel_params_accumulate() {
        let res = get_path(
            "/.well-known/webfinger?resource=acct:average@average.name\
             &rel=self&rel=http://webfinger.net/rel/profile-page",
        )
        .await;
        let doc = body_json(res).await;
        let links = doc["links"].as_array().unwrap();
        assert_eq!(links.len(), 2);
        // Record order, not query order:
        assert_eq!(links[0]["rel"], "http://webfinger.net/rel/profile-page");
        assert_eq!(links[1]["rel"], "self");
    }

    #[tokio::test]
    async fn unmatched_rel_yields_empty_links() {
        let res =
            get_path("/.well-known/webfinger?resource=acct:average@average.name&rel=nope").await;
        assert_eq!(res.status(), StatusCode::OK);
        let doc = body_json(res).await;
        assert!(doc["links"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn equivalent_queries_are_byte_identical() {
        let first = get_path("/.well-known/webfinger?resource=acct:average.name").await;
        let second = get_path("/.well-known/webfinger?resource=acct:avghelper@fosstodon.org").await;
        let a = axum::body::to_bytes(first.into_body(), 1024 * 1024).await.unwrap();
        let b = axum::body::to_bytes(second.into_body(), 1024 * 1024).await.unwrap();
        assert_eq!(a, b);
    }
}
