//! Per-page critical CSS lookup.
//!
//! Critical CSS for a page lives at `<critters root>/<page path>/styles.css`.
//! Lookups never fail: any read problem, including paths that would escape
//! the root, degrades to [`CriticalCss::NotFound`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

/// File name holding a page's critical CSS.
pub const STYLES_FILE: &str = "styles.css";

/// Outcome of a critical CSS lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriticalCss {
    /// Stylesheet text to inline.
    Found(String),
    /// Nothing to inline; fall back to stylesheet links.
    NotFound,
}

impl CriticalCss {
    /// Inlinable stylesheet text, if any.
    #[must_use]
    pub fn css(&self) -> Option<&str> {
        match self {
            Self::Found(css) => Some(css),
            Self::NotFound => None,
        }
    }
}

/// Reads critical CSS files relative to some root.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CriticalCssSource: Send + Sync {
    /// Read the UTF-8 file at `relative`.
    async fn read(&self, relative: &Path) -> io::Result<String>;
}

/// [`CriticalCssSource`] backed by a directory capability.
///
/// The directory is opened per read and released once the read returns.
#[derive(Debug, Clone)]
pub struct CrittersDir {
    root: PathBuf,
}

impl CrittersDir {
    /// Serve files below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CriticalCssSource for CrittersDir {
    async fn read(&self, relative: &Path) -> io::Result<String> {
        let root = self.root.clone();
        let file = relative.to_path_buf();
        web::block(move || {
            let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
            dir.read_to_string(&file)
        })
        .await
        .map_err(io::Error::other)?
    }
}

/// Path of the critical CSS file for `page`, relative to the critters root.
///
/// Everything from the first `?` is dropped.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use leaves_web::critical::critical_css_path;
///
/// assert_eq!(
///     critical_css_path("/dynamic/a?tab=2"),
///     Path::new("dynamic/a/styles.css")
/// );
/// ```
#[must_use]
pub fn critical_css_path(page: &str) -> PathBuf {
    let without_query = page.split_once('?').map_or(page, |(path, _)| path);
    Path::new(without_query.trim_start_matches('/')).join(STYLES_FILE)
}

/// Resolves the critical CSS for a page.
#[derive(Clone)]
pub struct CriticalCssLookup {
    source: Arc<dyn CriticalCssSource>,
}

impl CriticalCssLookup {
    /// Look up through an arbitrary source.
    #[must_use]
    pub const fn new(source: Arc<dyn CriticalCssSource>) -> Self {
        Self { source }
    }

    /// Look up files below `root` on disk.
    #[must_use]
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(CrittersDir::new(root)))
    }

    /// Critical CSS for `page`.
    ///
    /// An absent or empty page resolves to [`CriticalCss::NotFound`] without
    /// touching the source.
    pub async fn lookup(&self, page: Option<&str>) -> CriticalCss {
        let Some(path) = page.filter(|candidate| !candidate.is_empty()) else {
            return CriticalCss::NotFound;
        };
        let relative = critical_css_path(path);
        self.source.read(&relative).await.map_or_else(
            |err| {
                debug!(page = path, file = %relative.display(), error = %err, "no critical css");
                CriticalCss::NotFound
            },
            CriticalCss::Found,
        )
    }
}
