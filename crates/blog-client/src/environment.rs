//! Host environment check

/// Where the client runs. A local or developer environment talks to the
/// backend directly and never queries the tunnel agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnvironment {
    pub local_dev: bool,
    pub host: Option<String>,
}

impl HostEnvironment {
    pub fn new(local_dev: bool, host: Option<String>) -> Self {
        Self { local_dev, host }
    }

    pub fn is_local(&self) -> bool {
        self.local_dev || self.host.as_deref().is_some_and(is_loopback_host)
    }
}

fn is_loopback_host(host: &str) -> bool {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1" || host == "::1"
}
