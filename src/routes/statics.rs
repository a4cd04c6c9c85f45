//! Static asset resolution over the pre-built site tree.
//!
//! # Responsibilities
//! - Rewrite extension-less paths to their `.html` counterparts
//! - Percent-decode and normalize paths; reject traversal above the root
//! - Serve the custom 404 document on any miss
//!
//! # Design Decisions
//! - The build pipeline is a black box; this layer only maps path → file
//! - Unknown extensions serve as `application/octet-stream` so browsers
//!   never MIME-sniff (we send `nosniff` anyway)
//! - A miss is never a 500: the 404 document falls back to plain text if
//!   even it is missing

use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::http::server::AppState;

/// The document served on any miss, relative to the content root.
const NOT_FOUND_PAGE: &str = "404.html";

/// `GET /*` fallback: serve a file from the content root or the 404 page.
pub async fn serve(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(relative) = resolve_path(uri.path()) else {
        return miss(&state.content_root).await;
    };

    let full = state.content_root.join(&relative);
    match tokio::fs::read(&full).await {
        Ok(contents) => {
            let content_type = mime_for_path(&relative);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                contents,
            )
                .into_response()
        }
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %full.display(), error = %err, "asset read failed");
            }
            miss(&state.content_root).await
        }
    }
}

/// Map a request path to a relative file path under the content root.
///
/// The root resolves to the index document; paths that already carry an
/// extension resolve as-is; everything else gets `.html` appended. Returns
/// `None` for undecodable or root-escaping paths.
pub fn resolve_path(request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode(request_path)?;

    let rewritten = if decoded == "/" {
        "/index.html".to_string()
    } else if decoded.contains('.') {
        decoded
    } else {
        format!("{decoded}.html")
    };

    normalize_path(&rewritten)
}

/// Percent-decode a URL path byte-by-byte (RFC 3986 §2.1). `None` for a
/// truncated `%XX` sequence, a non-hex digit, or invalid UTF-8.
fn percent_decode(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len() {
                return None;
            }
            let hi = hex_digit(bytes[i + 1])?;
            let lo = hex_digit(bytes[i + 2])?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Strip `.` and `..` components, rejecting any path that would escape the
/// root.
fn normalize_path(decoded: &str) -> Option<PathBuf> {
    let mut parts: Vec<&str> = Vec::new();
    for component in decoded.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            name => parts.push(name),
        }
    }
    let mut path = PathBuf::new();
    for part in &parts {
        path.push(part);
    }
    Some(path)
}

/// `Content-Type` for a resolved file, by extension (case-insensitive).
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" | "webmanifest" => "application/json",
        "xml" | "xsl" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff2" => "font/woff2",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Serve the 404 document, or plain text when even that is missing.
async fn miss(content_root: &Path) -> Response {
    match tokio::fs::read(content_root.join(NOT_FOUND_PAGE)).await {
        Ok(contents) => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            contents,
        )
            .into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "Not Found",
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_to_index() {
        assert_eq!(resolve_path("/"), Some(PathBuf::from("index.html")));
    }

    #[test]
    fn extensionless_paths_gain_html() {
        assert_eq!(
            resolve_path("/ways/my-post"),
            Some(PathBuf::from("ways/my-post.html"))
        );
        assert_eq!(resolve_path("/contact"), Some(PathBuf::from("contact.html")));
    }

    #[test]
    fn extensions_pass_through() {
        assert_eq!(
            resolve_path("/images/logo.svg"),
            Some(PathBuf::from("images/logo.svg"))
        );
        assert_eq!(resolve_path("/robots.txt"), Some(PathBuf::from("robots.txt")));
        assert_eq!(
            resolve_path("/.well-known/fursona.json"),
            Some(PathBuf::from(".well-known/fursona.json"))
        );
    }

    #[test]
    fn percent_encoding_decodes() {
        assert_eq!(
            resolve_path("/ways/my%20post"),
            Some(PathBuf::from("ways/my post.html"))
        );
        assert_eq!(resolve_path("/bad%zz"), None);
        assert_eq!(resolve_path("/truncated%2"), None);
    }

    #[test]
    fn traversal_is_rejected() {
        assert_eq!(resolve_path("/../etc/passwd"), None);
        assert_eq!(resolve_path("/a/../../etc/passwd"), None);
        // `..` that stays inside the root is fine.
        assert_eq!(
            resolve_path("/a/../b.txt"),
            Some(PathBuf::from("b.txt"))
        );
    }

    #[test]
    fn mime_table_covers_site_assets() {
        assert_eq!(
            mime_for_path(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(mime_for_path(Path::new("rss/styles.xsl")), "application/xml");
        assert_eq!(mime_for_path(Path::new("images/logo.svg")), "image/svg+xml");
        assert_eq!(
            mime_for_path(Path::new("mystery.bin")),
            "application/octet-stream"
        );
    }
}
