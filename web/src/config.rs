//! Web front-end settings loaded via OrthoConfig.
//!
//! Layers CLI flags over environment variables (`HOSTNAME`, `PORT`,
//! `CRITTERS_RUNTIME`, `CRITTERS_DIR`, `STATIC_DIR`) over configuration
//! files.

use std::ffi::OsString;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Host used when none is configured.
pub const DEFAULT_HOSTNAME: &str = "localhost";
/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 3000;
/// Directory holding per-page critical CSS.
pub const DEFAULT_CRITTERS_DIR: &str = "critters";
/// Directory holding compiled stylesheets under `css/`.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Settings for the web process.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
pub struct WebSettings {
    /// Host name or address to bind.
    pub hostname: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Any non-empty value enables critical CSS inlining.
    pub critters_runtime: Option<String>,
    /// Root of the per-page critical CSS tree.
    pub critters_dir: Option<PathBuf>,
    /// Root of the static assets tree.
    pub static_dir: Option<PathBuf>,
}

impl WebSettings {
    /// Load settings from the given argument list plus environment and files.
    ///
    /// # Errors
    /// Returns an [`std::io::Error`] describing why the layers failed to merge.
    pub fn load_from_args<I>(args: I) -> std::io::Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
            .map_err(|err| std::io::Error::other(format!("invalid web settings: {err}")))
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

    /// Whether critical CSS mode is switched on.
    #[must_use]
    pub fn critters_runtime(&self) -> bool {
        self.critters_runtime
            .as_deref()
            .is_some_and(|flag| !flag.is_empty())
    }

    /// Critical CSS root, falling back to [`DEFAULT_CRITTERS_DIR`].
    #[must_use]
    pub fn critters_dir(&self) -> PathBuf {
        self.critters_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CRITTERS_DIR))
    }

    /// Static assets root, falling back to [`DEFAULT_STATIC_DIR`].
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.static_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
    }
}
