//! On-demand-TLS domain validation.
//!
//! Caddy's on-demand TLS asks this endpoint whether to mint a certificate
//! for a requested hostname; see
//! <https://caddyserver.com/docs/automatic-https#on-demand-tls>. The endpoint
//! is polled repeatedly, so it must stay a plain set-membership check with
//! no I/O.

use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::error::EdgeError;
use crate::http::server::AppState;

/// The short domain every eligible hostname hangs off.
const BARE_DOMAIN: &str = "avg.name";

/// Subdomains that get a `*.avg.name` alias.
const ALIAS_PREFIXES: &[&str] = &[
    "blog",
    "dotfiles",
    "flashcards",
    "git",
    "ip",
    "ipv4",
    "jsonresume",
    "status",
    "www",
];

/// Subdomains that get an AT Protocol handle, i.e. `@avg.average.name`.
const HANDLE_PREFIXES: &[&str] = &[
    // "test" is reserved internally; do not add it here.
    "avgtest", //
    "avg",
];

/// Hostnames eligible for automatic certificate issuance. Built once at
/// startup, read-only afterwards.
#[derive(Debug)]
pub struct DomainAllowList {
    domains: HashSet<String>,
}

impl DomainAllowList {
    pub fn new() -> Self {
        let mut domains = HashSet::new();
        domains.insert(BARE_DOMAIN.to_string());
        for prefix in ALIAS_PREFIXES {
            domains.insert(format!("{prefix}.{BARE_DOMAIN}"));
        }
        for prefix in HANDLE_PREFIXES {
            domains.insert(format!("{prefix}.average.name"));
        }
        Self { domains }
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }
}

impl Default for DomainAllowList {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
pub struct DomainQuery {
    domain: Option<String>,
}

/// `GET /.well-known/domains?domain=<hostname>`
///
/// 204 for an eligible hostname, 404 otherwise, 400 when the parameter is
/// missing. No body in any case.
pub async fn on_demand_tls(
    State(state): State<AppState>,
    Query(query): Query<DomainQuery>,
) -> Result<StatusCode, EdgeError> {
    let domain = query.domain.ok_or(EdgeError::BadRequest)?;
    if state.domains.contains(&domain) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(EdgeError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_is_eligible() {
        let list = DomainAllowList::new();
        assert!(list.contains("avg.name"));
    }

    #[test]
    fn every_generated_alias_is_eligible() {
        let list = DomainAllowList::new();
        for prefix in ALIAS_PREFIXES {
            assert!(list.contains(&format!("{prefix}.avg.name")), "{prefix}");
        }
        for prefix in HANDLE_PREFIXES {
            assert!(list.contains(&format!("{prefix}.average.name")), "{prefix}");
        }
    }

    #[test]
    fn everything_else_is_ineligible() {
        let list = DomainAllowList::new();
        for domain in [
            "example.com",
            "foo.avg.name",
            "nobodyhere.average.name",
            "average.name",
            "avg.name.evil.example",
            "",
        ] {
            assert!(!list.contains(domain), "{domain}");
        }
    }
}
