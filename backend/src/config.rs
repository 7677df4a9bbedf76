//! Listener settings loaded via OrthoConfig.
//!
//! Values layer CLI flags (`--hostname`, `--port`) over the `HOSTNAME` and
//! `PORT` environment variables over configuration files, falling back to
//! `localhost:5002`.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Host used when none is configured.
pub const DEFAULT_HOSTNAME: &str = "localhost";
/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 5002;

/// Settings controlling where the API listens.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
pub struct ApiSettings {
    /// Host name or address to bind.
    pub hostname: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
}

impl ApiSettings {
    /// Load settings from the given argument list plus environment and files.
    ///
    /// # Errors
    /// Returns an [`std::io::Error`] describing why the layers failed to merge.
    pub fn load_from_args<I>(args: I) -> std::io::Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
            .map_err(|err| std::io::Error::other(format!("invalid API settings: {err}")))
    }

    /// Configured host, falling back to [`DEFAULT_HOSTNAME`].
    #[must_use]
    pub fn hostname(&self) -> &str {
        self.hostname
            .as_deref()
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(DEFAULT_HOSTNAME)
    }

    /// Configured port, falling back to [`DEFAULT_PORT`].
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }
}
