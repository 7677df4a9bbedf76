//! Server construction, middleware wiring and graceful shutdown.

mod config;
mod modules;

pub use config::ServerConfig;
pub use modules::{UsersModule, build_http_state};

use std::future::Future;
use std::net::SocketAddr;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::doc::{ApiDoc, DOCS_JSON_PATH, DOCS_PATH};
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;

/// Assemble the application: users API and documentation.
#[must_use]
pub fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(users::configure);

    App::new()
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(web::redirect(DOCS_PATH, format!("{DOCS_PATH}/")))
        .service(
            SwaggerUi::new(format!("{DOCS_PATH}/{{_:.*}}")).url(DOCS_JSON_PATH, ApiDoc::openapi()),
        )
}

/// A bound, not yet awaited, HTTP server.
pub struct BoundServer {
    /// Server future; await it to drive the listener.
    pub server: Server,
    /// Socket addresses the listener actually bound.
    pub addrs: Vec<SocketAddr>,
}

/// Bind the HTTP server once for this process.
///
/// Actix's own signal handling is disabled; pair the returned server with
/// [`drain_on`] so the supervisor's stop request drains traffic explicitly.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    http_state: web::Data<HttpState>,
    config: &ServerConfig,
) -> std::io::Result<BoundServer> {
    let http_server = HttpServer::new(move || build_app(http_state.clone()))
        .disable_signals()
        .shutdown_timeout(config.shutdown_timeout_secs)
        .bind((config.hostname.as_str(), config.port))?;
    let addrs = http_server.addrs();
    Ok(BoundServer {
        server: http_server.run(),
        addrs,
    })
}

/// Dispose hook: wait for `signal`, then stop accepting connections and let
/// in-flight requests finish within the shutdown window.
pub async fn drain_on<F>(signal: F, handle: ServerHandle)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested; draining in-flight requests");
    handle.stop(true).await;
    info!("server stopped");
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
