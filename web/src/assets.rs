//! Compiled stylesheet serving.

use std::io;
use std::path::{Path, PathBuf};

use actix_web::http::header::CACHE_CONTROL;
use actix_web::{HttpResponse, get, web};
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::server::WebState;

/// Stylesheets read from `<static root>/css`.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
}

impl StaticAssets {
    /// Serve stylesheets below `root/css`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read the stylesheet called `file`.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::NotFound`] for names that are not plain
    /// `.css` file names, otherwise whatever the read produced.
    pub async fn stylesheet(&self, file: &str) -> io::Result<Vec<u8>> {
        let is_plain_css = Path::new(file)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
            && !file.contains(['/', '\\'])
            && !file.starts_with('.');
        if !is_plain_css {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        let root = self.root.clone();
        let relative = Path::new("css").join(file);
        web::block(move || {
            let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
            dir.read(&relative)
        })
        .await
        .map_err(io::Error::other)?
    }
}

/// `GET /static/css/{file}`.
#[get("/static/css/{file}")]
pub async fn stylesheet(state: web::Data<WebState>, file: web::Path<String>) -> HttpResponse {
    match state.assets.stylesheet(&file).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(actix_web::mime::TEXT_CSS_UTF_8)
            .insert_header((CACHE_CONTROL, "public, max-age=3600"))
            .body(bytes),
        Err(err) => {
            debug!(file = %file, error = %err, "stylesheet unavailable");
            HttpResponse::NotFound().finish()
        }
    }
}
