//! The fixed identity this service answers discovery queries for.
//!
//! # Design Decisions
//! - One compile-time-known record, built once at startup, shared via Arc
//! - Link fields that are absent are omitted from JSON entirely (RFC 7033)
//! - No runtime mutation; concurrent reads need no synchronization

use serde::Serialize;

/// The site's canonical domain.
pub const SITE_DOMAIN: &str = "average.name";

/// The site's canonical origin, used for CORS and CSP.
pub const SITE_ORIGIN: &str = "https://average.name";

/// The fediverse instance that hosts the account this site aliases.
pub const HOME_INSTANCE: &str = "fosstodon.org";

/// Pronouns advertised in `X-Pronouns-Acceptable` and at `/.well-known/pronouns`.
pub const PRONOUNS_EN: &str = "she/her";

/// A single JRD link. Optional fields serialize only when present.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub rel: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Link {
    fn profile_page(url: impl Into<String>) -> Self {
        Self {
            rel: "http://webfinger.net/rel/profile-page".into(),
            media_type: Some("text/html".into()),
            href: Some(url.into()),
            template: None,
        }
    }

    fn activity_self(url: impl Into<String>) -> Self {
        Self {
            rel: "self".into(),
            media_type: Some("application/activity+json".into()),
            href: Some(url.into()),
            template: None,
        }
    }

    fn subscribe(template: impl Into<String>) -> Self {
        Self {
            // ostatus.org is long gone, but Mastodon's docs still use this rel
            rel: "http://ostatus.org/schema/1.0/subscribe".into(),
            media_type: None,
            href: None,
            template: Some(template.into()),
        }
    }
}

/// The WebFinger subject, its aliases, and its links, in fixed order.
#[derive(Debug, Clone, Serialize)]
pub struct IdentityRecord {
    pub subject: String,
    pub aliases: Vec<String>,
    pub links: Vec<Link>,
}

impl IdentityRecord {
    /// Hosts this record is authoritative for. A `resource` pointing anywhere
    /// else is unknown to us.
    pub fn known_hosts(&self) -> [&'static str; 2] {
        [SITE_DOMAIN, HOME_INSTANCE]
    }
}

impl Default for IdentityRecord {
    fn default() -> Self {
        Self {
            subject: format!("acct:avghelper@{HOME_INSTANCE}"),
            aliases: vec![
                format!("{SITE_ORIGIN}/@average"),
                format!("{SITE_ORIGIN}/@avg"),
                format!("{SITE_ORIGIN}/@avghelper"),
                format!("https://{HOME_INSTANCE}/@avghelper"),
                format!("https://{HOME_INSTANCE}/users/avghelper"),
            ],
            links: vec![
                Link::profile_page(format!("https://{HOME_INSTANCE}/@avghelper")),
                Link::activity_self(format!("https://{HOME_INSTANCE}/users/avghelper")),
                Link::subscribe(format!(
                    "https://{HOME_INSTANCE}/authorize_interaction?uri={{uri}}"
                )),
            ],
        }
    }
}
