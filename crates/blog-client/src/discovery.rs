//! Public URL discovery through the tunnel agent's inspection endpoint

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ClientError, DiscoveryError};

/// Something that can name the backend's current public base URL.
#[async_trait]
pub trait DiscoverySource: Send + Sync {
    async fn discover(&self) -> Result<String, DiscoveryError>;
}

#[derive(Debug, Deserialize)]
struct TunnelList {
    tunnels: Vec<Tunnel>,
}

#[derive(Debug, Deserialize)]
struct Tunnel {
    public_url: String,
}

/// Queries the tunnel agent and extracts a public URL from its JSON API
/// (`{"tunnels":[{"public_url":...}]}`). When that fails, the agent's HTML
/// dashboard is read instead. The dashboard defaults to the root of the API
/// URL's origin (`http://localhost:4040/` for the default agent).
pub struct TunnelDiscovery {
    client: Client,
    api_url: String,
    dashboard_url: Option<String>,
    pattern: Regex,
}

impl TunnelDiscovery {
    pub fn new(url: impl Into<String>, pattern: &str, timeout: Duration) -> Result<Self, ClientError> {
        let api_url = url.into();
        let dashboard_url = origin_root(&api_url);
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            dashboard_url,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Replaces the derived dashboard address.
    pub fn with_dashboard(mut self, url: impl Into<String>) -> Self {
        self.dashboard_url = Some(url.into());
        self
    }

    /// URLs tried in order; the dashboard is skipped when it is the API URL.
    fn targets(&self) -> Vec<&str> {
        let mut targets = vec![self.api_url.as_str()];
        if let Some(dashboard) = self.dashboard_url.as_deref() {
            if !same_url(dashboard, &self.api_url) {
                targets.push(dashboard);
            }
        }
        targets
    }

    async fn fetch(&self, url: &str) -> Result<String, DiscoveryError> {
        debug!("Querying tunnel agent at {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DiscoveryError::Timeout
            } else {
                DiscoveryError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                DiscoveryError::Timeout
            } else {
                DiscoveryError::Malformed(e.to_string())
            }
        })?;
        parse_tunnel_payload(&body, &self.pattern)
    }
}

fn origin_root(url: &str) -> Option<String> {
    Url::parse(url).ok()?.join("/").ok().map(String::from)
}

fn same_url(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[async_trait]
impl DiscoverySource for TunnelDiscovery {
    /// Returns the error of the last URL tried when none yields a public URL.
    async fn discover(&self) -> Result<String, DiscoveryError> {
        let mut last_error = DiscoveryError::NoMatch;
        for url in self.targets() {
            match self.fetch(url).await {
                Ok(public_url) => return Ok(public_url),
                Err(e) => {
                    warn!("Tunnel agent query at {} failed: {}", url, e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

/// Extracts the public URL from a tunnel agent response body.
///
/// JSON bodies: the first `https` tunnel, else the first tunnel. Anything else
/// is searched as HTML for the first match of `pattern`.
pub fn parse_tunnel_payload(body: &str, pattern: &Regex) -> Result<String, DiscoveryError> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let list: TunnelList =
            serde_json::from_str(trimmed).map_err(|e| DiscoveryError::Malformed(e.to_string()))?;
        let urls: Vec<&str> = list
            .tunnels
            .iter()
            .map(|t| t.public_url.trim())
            .filter(|url| !url.is_empty())
            .collect();
        return urls
            .iter()
            .find(|url| url.starts_with("https://"))
            .or_else(|| urls.first())
            .map(|url| url.to_string())
            .ok_or(DiscoveryError::NoMatch);
    }

    pattern
        .find(body)
        .map(|m| m.as_str().to_string())
        .ok_or(DiscoveryError::NoMatch)
}
