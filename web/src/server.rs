//! Web server construction and graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use crate::PathForwarding;
use crate::assets::{self, StaticAssets};
use crate::config::WebSettings;
use crate::critical::CriticalCssLookup;
use crate::layout::Layout;
use crate::pages::render_page;

/// Seconds in-flight requests get to finish once shutdown starts.
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Process-wide, read-only state shared by every handler.
#[derive(Clone)]
pub struct WebState {
    /// Root document layout.
    pub layout: Layout,
    /// Critical CSS resolver.
    pub critical: CriticalCssLookup,
    /// Compiled stylesheet reader.
    pub assets: StaticAssets,
}

impl WebState {
    /// Bundle the collaborators.
    #[must_use]
    pub const fn new(layout: Layout, critical: CriticalCssLookup, assets: StaticAssets) -> Self {
        Self {
            layout,
            critical,
            assets,
        }
    }

    /// Build the state described by `settings`.
    #[must_use]
    pub fn from_settings(settings: &WebSettings) -> Self {
        Self::new(
            Layout::new(settings.critters_runtime()),
            CriticalCssLookup::from_dir(settings.critters_dir()),
            StaticAssets::new(settings.static_dir()),
        )
    }
}

/// Assemble the application: stylesheets plus every page.
#[must_use]
pub fn build_app(
    state: web::Data<WebState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(PathForwarding)
        .service(assets::stylesheet)
        .route("/{tail:.*}", web::get().to(render_page))
}

/// A bound, not yet awaited, HTTP server.
pub struct BoundServer {
    /// Server future; await it to drive the listener.
    pub server: Server,
    /// Socket addresses the listener actually bound.
    pub addrs: Vec<SocketAddr>,
}

/// Bind the web server on `hostname:port`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    state: web::Data<WebState>,
    hostname: &str,
    port: u16,
) -> std::io::Result<BoundServer> {
    let http_server = HttpServer::new(move || build_app(state.clone()))
        .disable_signals()
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
        .bind((hostname, port))?;
    let addrs = http_server.addrs();
    Ok(BoundServer {
        server: http_server.run(),
        addrs,
    })
}

/// Wait for `signal`, then stop the server gracefully.
pub async fn drain_on<F>(signal: F, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested; draining in-flight requests");
    handle.stop(true).await;
}

/// Resolve on SIGINT, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn state_follows_settings() {
        let settings = WebSettings {
            critters_runtime: Some("1".to_owned()),
            ..WebSettings::default()
        };
        assert!(WebState::from_settings(&settings).layout.critters_runtime());
        assert!(!WebState::from_settings(&WebSettings::default()).layout.critters_runtime());
    }

    #[actix_web::test]
    async fn bound_server_drains_on_signal() {
        let state = web::Data::new(WebState::from_settings(&WebSettings::default()));
        let bound = create_server(state, "127.0.0.1", 0).expect("bind");
        assert!(bound.addrs.iter().all(|addr| addr.port() != 0));

        let handle = bound.server.handle();
        let running = actix_web::rt::spawn(bound.server);
        drain_on(std::future::ready(()), handle).await;
        running
            .await
            .expect("server task joins")
            .expect("server exits cleanly");
    }
}
