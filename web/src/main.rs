//! Web entry-point: loads settings and serves pages until a shutdown signal
//! arrives.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use leaves_web::config::WebSettings;
use leaves_web::server::{WebState, create_server, drain_on, shutdown_signal};

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

    let settings = WebSettings::load_from_args(std::env::args_os())?;
    let state = web::Data::new(WebState::from_settings(&settings));
    let bound = create_server(state, settings.hostname(), settings.port())?;
    info!(
        addrs = ?bound.addrs,
        critters_runtime = settings.critters_runtime(),
        "Web front-end running on http://{}:{}",
        settings.hostname(),
        settings.port()
    );

    let handle = bound.server.handle();
    actix_web::rt::spawn(drain_on(shutdown_signal(), handle));
    bound.server.await
}
