//! API entry-point: loads settings, registers modules and serves until a
//! shutdown signal arrives.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use leaves_api::config::ApiSettings;
use leaves_api::outbound::persistence::DocumentStore;
use leaves_api::server::{ServerConfig, build_http_state, create_server, drain_on, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ApiSettings::load_from_args(std::env::args_os())?;
    let config = ServerConfig::from(&settings);

    let store = DocumentStore::new();
    let http_state = build_http_state(&store)
        .map_err(|err| std::io::Error::other(format!("module registration failed: {err}")))?;

    let bound = create_server(web::Data::new(http_state), &config)?;
    info!(
        addrs = ?bound.addrs,
        "Server running on http://{}:{}",
        config.hostname(),
        config.port()
    );

    let handle = bound.server.handle();
    actix_web::rt::spawn(drain_on(shutdown_signal(), handle));
    bound.server.await
}
