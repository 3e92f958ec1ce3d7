//! Outbound redirect probe.
//!
//! A probe issues a single HEAD request without following redirects and
//! classifies the response. All failures are absorbed into `None` so a
//! flaky upstream can never fault a connection handler.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::dto::UnshortenInfo;

/// Trait seam for the outbound redirect check, mockable in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectProbe: Send + Sync {
    /// Probes `url` once.
    ///
    /// Returns `Some` only when the response is a 3xx carrying a readable
    /// `Location` header; every error path (timeout, connection failure,
    /// non-redirect status, missing header) yields `None`.
    async fn probe(&self, url: &str) -> Option<UnshortenInfo>;
}

/// Production probe backed by a [`reqwest::Client`].
pub struct HttpRedirectProbe {
    client: reqwest::Client,
}

impl HttpRedirectProbe {
    /// Builds a client that never follows redirects and times out after
    /// `timeout` per request.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`reqwest::Error`] if the TLS backend cannot
    /// be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RedirectProbe for HttpRedirectProbe {
    async fn probe(&self, url: &str) -> Option<UnshortenInfo> {
        let response = match self.client.head(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("probe request for {url} failed: {e}");
                return None;
            }
        };

        if !response.status().is_redirection() {
            debug!("no redirect for {url} (status {})", response.status());
            return None;
        }

        let target = match response.headers().get(LOCATION).map(|v| v.to_str()) {
            Some(Ok(target)) => target.to_string(),
            Some(Err(_)) => {
                warn!("probe for {url} returned a non-UTF-8 Location header");
                return None;
            }
            None => {
                debug!("redirect status for {url} without a Location header");
                return None;
            }
        };

        Some(UnshortenInfo {
            redirected_to_same_host: same_host(url, &target),
            redirects_to: target,
        })
    }
}

/// Compares the parsed hostnames of two URLs.
///
/// A relative redirect target has no hostname of its own; two absent
/// hostnames compare equal, matching how clients treat a same-site
/// relative `Location`.
fn same_host(source: &str, target: &str) -> bool {
    hostname_of(source) == hostname_of(target)
}

fn hostname_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_host_for_matching_hostnames() {
        assert!(same_host(
            "http://short.example/x",
            "http://short.example/y"
        ));
    }

    #[test]
    fn test_same_host_ignores_scheme_port_and_path() {
        assert!(same_host(
            "http://short.example/x",
            "https://short.example:8443/deep/path?q=1"
        ));
    }

    #[test]
    fn test_different_hostnames() {
        assert!(!same_host("http://short.example/x", "http://real.example/y"));
    }

    #[test]
    fn test_relative_target_has_no_hostname() {
        // A real source against a relative target differs; two hostless
        // inputs compare equal.
        assert!(!same_host("http://short.example/x", "/relative/path"));
        assert!(same_host("not a url", "/relative/path"));
    }
}
