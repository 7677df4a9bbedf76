//! HTTP server configuration object.

use crate::config::ApiSettings;

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) hostname: String,
    pub(crate) port: u16,
    pub(crate) shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Seconds in-flight requests get to finish once shutdown starts.
    pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

    /// Listen on `hostname:port`.
    #[must_use]
    pub fn new(hostname: impl Into<String>, port: u16) -> Self {
        Self {
            hostname: hostname.into(),
            port,
            shutdown_timeout_secs: Self::DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }

    /// Override the graceful shutdown window.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, secs: u64) -> Self {
        self.shutdown_timeout_secs = secs;
        self
    }

    /// Configured host name.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Configured port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl From<&ApiSettings> for ServerConfig {
    fn from(settings: &ApiSettings) -> Self {
        Self::new(settings.hostname(), settings.port())
    }
}
