// ============================================================================
// Blog Client - Endpoint Resolver
// File: crates/blog-client/src/resolver.rs
// ============================================================================
//! Cached backend base URL with discovery, fallback and a retry-once request
//! wrapper.
//!
//! The cached value lives in an [`EndpointState`] behind a `parking_lot`
//! lock that is never held across an await. Concurrent callers that see a
//! stale cache may each run discovery; the last write wins and every written
//! value is a discovered or fallback URL.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::discovery::{DiscoverySource, TunnelDiscovery};
use crate::environment::HostEnvironment;
use crate::error::{AttemptError, ClientError, RequestFailure, StoreError};
use crate::override_store::{FileOverrideStore, MemoryOverrideStore, OverrideStore};

/// The resolver's cache: last base URL and when it was resolved.
#[derive(Debug, Clone, Default)]
pub struct EndpointState {
    cached_base_url: Option<String>,
    last_resolved_at: Option<Instant>,
}

impl EndpointState {
    pub fn cached_base_url(&self) -> Option<&str> {
        self.cached_base_url.as_deref()
    }

    /// The cached URL if it was resolved less than `interval` ago.
    fn fresh(&self, interval: Duration, now: Instant) -> Option<&str> {
        let resolved_at = self.last_resolved_at?;
        if now.saturating_duration_since(resolved_at) < interval {
            self.cached_base_url.as_deref()
        } else {
            None
        }
    }

    fn store(&mut self, url: String, now: Instant) {
        self.cached_base_url = Some(url);
        self.last_resolved_at = Some(now);
    }
}

/// Method, body and credentials for a wrapped request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub bearer_token: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self { method: Method::GET, body: None, bearer_token: None }
    }

    pub fn with_body(method: Method, body: Value) -> Self {
        Self { method, body: Some(body), bearer_token: None }
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// Joins a base URL and an endpoint with exactly one `/` between them.
pub fn build_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    if endpoint.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, endpoint)
    }
}

pub struct EndpointResolver {
    state: RwLock<EndpointState>,
    refresh_interval: Duration,
    local_base_url: String,
    source: Arc<dyn DiscoverySource>,
    overrides: Arc<dyn OverrideStore>,
    environment: HostEnvironment,
    http: Client,
    refresher: Mutex<Option<JoinHandle<()>>>,
}

impl EndpointResolver {
    pub fn new(
        source: Arc<dyn DiscoverySource>,
        overrides: Arc<dyn OverrideStore>,
        environment: HostEnvironment,
        local_base_url: impl Into<String>,
        refresh_interval: Duration,
        request_timeout: Duration,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            state: RwLock::new(EndpointState::default()),
            refresh_interval,
            local_base_url: local_base_url.into(),
            source,
            overrides,
            environment,
            http: Client::builder().timeout(request_timeout).build()?,
            refresher: Mutex::new(None),
        })
    }

    /// Wires the tunnel agent, the override store and the environment check
    /// from configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut source = TunnelDiscovery::new(&config.discovery_url, &config.public_url_pattern, timeout)?;
        if let Some(dashboard) = &config.dashboard_url {
            source = source.with_dashboard(dashboard);
        }
        let overrides: Arc<dyn OverrideStore> = match &config.override_file {
            Some(path) => Arc::new(FileOverrideStore::new(path)),
            None => Arc::new(MemoryOverrideStore::new()),
        };
        Self::new(
            Arc::new(source),
            overrides,
            HostEnvironment::new(config.local_dev, config.host.clone()),
            &config.local_base_url,
            Duration::from_secs(config.refresh_interval_secs),
            timeout,
        )
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Snapshot of the current cache.
    pub fn state(&self) -> EndpointState {
        self.state.read().clone()
    }

    /// Cached base URL while fresh, otherwise a new discovery.
    pub async fn resolve(&self) -> String {
        let cached = self
            .state
            .read()
            .fresh(self.refresh_interval, Instant::now())
            .map(str::to_string);
        match cached {
            Some(url) => url,
            None => self.force_refresh().await,
        }
    }

    /// Discovers unconditionally and stores the result.
    pub async fn force_refresh(&self) -> String {
        let url = self.discover().await;
        self.state.write().store(url.clone(), Instant::now());
        info!("API base URL set to {}", url);
        url
    }

    /// Never fails: local environments get the local address; otherwise the
    /// tunnel agent is asked and any failure falls back to the manual override,
    /// then to the local address.
    pub async fn discover(&self) -> String {
        if self.environment.is_local() {
            debug!("Local environment, using {}", self.local_base_url);
            return self.local_base_url.clone();
        }

        match self.source.discover().await {
            Ok(url) => url,
            Err(e) => {
                let fallback = self.manual_override().unwrap_or_else(|| self.local_base_url.clone());
                warn!("Public URL discovery failed ({}), falling back to {}", e, fallback);
                fallback
            }
        }
    }

    /// Sends `options` to `endpoint` on the resolved base URL. Any failure
    /// triggers exactly one forced refresh and exactly one retry.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, RequestFailure> {
        let base = self.resolve().await;
        let first = match self.attempt(&base, endpoint, &options).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        warn!("Request to {} failed: {}; refreshing base URL and retrying", endpoint, first);

        let base = self.force_refresh().await;
        self.attempt(&base, endpoint, &options).await.map_err(|retry| {
            warn!("Retry of {} failed: {}", endpoint, retry);
            RequestFailure { first, retry }
        })
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        base: &str,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<T, AttemptError> {
        let url = build_url(base, endpoint);
        debug!("{} {}", options.method, url);

        let mut request = self.http.request(options.method.clone(), &url);
        if let Some(token) = &options.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::Status { status: status.as_u16(), body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| AttemptError::Decode(e.to_string()))
    }

    /// Stores the fallback address. A blank value clears the override.
    pub fn set_manual_override(&self, url: &str) -> Result<(), StoreError> {
        let url = url.trim();
        if url.is_empty() {
            return self.clear_manual_override();
        }
        info!("Manual API base URL override set to {}", url);
        self.overrides.set(url)
    }

    /// The stored override, ignoring blank values left in the store.
    pub fn manual_override(&self) -> Option<String> {
        self.overrides
            .get()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    pub fn clear_manual_override(&self) -> Result<(), StoreError> {
        self.overrides.clear()
    }

    /// Refreshes now and then every refresh interval on a background task.
    /// Returns false when a refresher is already running.
    pub fn start_periodic_refresh(self: &Arc<Self>) -> bool {
        let mut refresher = self.refresher.lock();
        if refresher.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return false;
        }

        let resolver: Weak<Self> = Arc::downgrade(self);
        let period = self.refresh_interval.max(Duration::from_millis(1));
        *refresher = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let Some(strong) = resolver.upgrade() else { break };
                strong.force_refresh().await;
            }
        }));
        info!("Periodic API base URL refresh started, every {:?}", period);
        true
    }

    pub fn stop_periodic_refresh(&self) {
        if let Some(handle) = self.refresher.lock().take() {
            handle.abort();
            info!("Periodic API base URL refresh stopped");
        }
    }

    pub fn is_refreshing_periodically(&self) -> bool {
        self.refresher.lock().as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for EndpointResolver {
    fn drop(&mut self) {
        if let Some(handle) = self.refresher.get_mut().take() {
            handle.abort();
        }
    }
}
