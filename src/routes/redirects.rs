//! The fixed redirect table.
//!
//! An explicit ordered slice, registered before the static wildcard so a
//! redirect can never be shadowed by a file of the same name. Order within
//! the table is fixed at startup and never changes.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::http::server::AppState;

/// A single path → location mapping.
#[derive(Debug, Clone, Copy)]
pub struct RedirectEntry {
    pub from: &'static str,
    pub to: &'static str,
    /// 301 or 302.
    pub permanent: bool,
}

impl RedirectEntry {
    const fn found(from: &'static str, to: &'static str) -> Self {
        Self {
            from,
            to,
            permanent: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.permanent {
            StatusCode::MOVED_PERMANENTLY
        } else {
            StatusCode::FOUND
        }
    }

    fn response(&self) -> Response {
        (
            self.status(),
            [(header::LOCATION, HeaderValue::from_static(self.to))],
        )
            .into_response()
    }
}

/// All configured redirects, in registration order.
pub const REDIRECTS: &[RedirectEntry] = &[
    // Subdomain conveniences
    RedirectEntry::found("/ip", "https://ip.average.name"),
    // Fediverse handle aliases
    RedirectEntry::found("/@avg", "https://fosstodon.org/@avghelper"),
    RedirectEntry::found("/@avghelper", "https://fosstodon.org/@avghelper"),
    RedirectEntry::found("/@average", "https://fosstodon.org/@avghelper"),
    // Legacy page names
    RedirectEntry::found("/how", "/ways"),
    RedirectEntry::found("/how.html", "/ways.html"),
    RedirectEntry::found("/bookmarks", "/links"),
    RedirectEntry::found("/bookmarks.html", "/links.html"),
    // Well-known conveniences
    RedirectEntry::found("/pronouns", "/.well-known/pronouns"),
    RedirectEntry::found("/fursona.json", "/.well-known/fursona.json"),
    RedirectEntry::found("/.well-known/fursona", "/.well-known/fursona.json"),
];

/// Register every table entry, preserving order.
pub fn routes() -> Router<AppState> {
    let mut router = Router::new();
    for entry in REDIRECTS {
        router = router.route(entry.from, get(move || async move { entry.response() }));
    }
    router
}
