//! Startup network-reachability self-checks.
//!
//! The site redirects to a handful of external targets; when the self-check
//! flag is on, we probe each once at startup and log the ones that do not
//! answer. Purely advisory: a dead target never stops the server, and the
//! checks are skipped entirely in tests and CI.

use std::time::Duration;

use crate::identity::{HOME_INSTANCE, SITE_ORIGIN};

/// External URLs this deployment depends on.
fn targets() -> Vec<String> {
    vec![
        SITE_ORIGIN.to_string(),
        "https://ip.average.name".to_string(),
        format!("https://{HOME_INSTANCE}/@avghelper"),
        format!("https://{HOME_INSTANCE}/.well-known/nodeinfo"),
    ]
}

/// Probe every target once, logging failures at warn level.
pub async fn run() {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(error = %err, "self-check client failed to build; skipping");
            return;
        }
    };

    for url in targets() {
        match client.head(&url).send().await {
            Ok(res) if res.status().is_success() || res.status().is_redirection() => {
                tracing::debug!(url = %url, status = %res.status(), "self-check ok");
            }
            Ok(res) => {
                tracing::warn!(url = %url, status = %res.status(), "self-check target unhappy");
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "self-check target unreachable");
            }
        }
    }
}
