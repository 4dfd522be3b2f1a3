//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

/// Default bind address when `CALBRIDGE_BIND` is not set.
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default per-call provider timeout in seconds.
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,

    /// Timeout applied to each outbound provider call.
    pub provider_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.parse().expect("valid default bind address"),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads `CALBRIDGE_BIND` (socket address) and
    /// `CALBRIDGE_PROVIDER_TIMEOUT_SECS` (integer seconds); unset or
    /// unparseable values fall back to the defaults with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("CALBRIDGE_BIND") {
            match value.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => warn!(value = %value, "ignoring unparseable CALBRIDGE_BIND"),
            }
        }

        if let Ok(value) = std::env::var("CALBRIDGE_PROVIDER_TIMEOUT_SECS") {
            match value.parse::<u64>() {
                Ok(secs) => config.provider_timeout = Duration::from_secs(secs),
                Err(_) => {
                    warn!(value = %value, "ignoring unparseable CALBRIDGE_PROVIDER_TIMEOUT_SECS")
                }
            }
        }

        config
    }

    /// Builder: set the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Builder: set the provider timeout.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }
}
