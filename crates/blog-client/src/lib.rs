//! # Blog Client
//!
//! Finds the backend's public base URL through the tunnel agent's local
//! inspection endpoint, caches it for a bounded interval, and wraps API calls
//! with a refresh-and-retry-once policy.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use blog_client::{ClientConfig, EndpointResolver, RequestOptions};
//!
//! let resolver = EndpointResolver::from_config(&ClientConfig::load()?)?;
//! let health: serde_json::Value = resolver.request("/api/health", RequestOptions::get()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod override_store;
pub mod resolver;

pub use config::ClientConfig;
pub use discovery::{DiscoverySource, TunnelDiscovery};
pub use environment::HostEnvironment;
pub use error::{AttemptError, ClientError, DiscoveryError, RequestFailure, StoreError};
pub use override_store::{FileOverrideStore, MemoryOverrideStore, OverrideStore};
pub use resolver::{build_url, EndpointResolver, EndpointState, RequestOptions};
