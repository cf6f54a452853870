//! Client configuration

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_DISCOVERY_URL: &str = "http://localhost:4040/api/tunnels";
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PUBLIC_URL_PATTERN: &str = r"https?://[a-zA-Z0-9-]+\.cpolar\.(io|cn)";

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Tunnel agent JSON API.
    pub discovery_url: String,
    /// HTML dashboard read when the JSON API fails; the root of
    /// `discovery_url`'s origin when unset.
    #[serde(default)]
    pub dashboard_url: Option<String>,
    /// Fixed address used in local environments and as the last fallback.
    pub local_base_url: String,
    /// Matches public URLs embedded in an HTML dashboard.
    pub public_url_pattern: String,
    pub refresh_interval_secs: u64,
    pub timeout_secs: u64,
    pub local_dev: bool,
    pub host: Option<String>,
    /// JSON file holding the manual override; in-memory when unset.
    pub override_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            dashboard_url: None,
            local_base_url: DEFAULT_LOCAL_BASE_URL.to_string(),
            public_url_pattern: DEFAULT_PUBLIC_URL_PATTERN.to_string(),
            refresh_interval_secs: 300,
            timeout_secs: 5,
            local_dev: false,
            host: None,
            override_file: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, then `config/client.toml`, then `BLOG_CLIENT_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("discovery_url", defaults.discovery_url)?
            .set_default("local_base_url", defaults.local_base_url)?
            .set_default("public_url_pattern", defaults.public_url_pattern)?
            .set_default("refresh_interval_secs", defaults.refresh_interval_secs)?
            .set_default("timeout_secs", defaults.timeout_secs)?
            .set_default("local_dev", defaults.local_dev)?
            .add_source(File::with_name("config/client").required(false))
            .add_source(
                Environment::with_prefix("BLOG_CLIENT")
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}
