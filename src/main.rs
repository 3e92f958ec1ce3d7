use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use url_unshortener::config::Config;
use url_unshortener::error::ServerError;
use url_unshortener::probe::HttpRedirectProbe;
use url_unshortener::server::Server;
use url_unshortener::service::UnshortenService;
use url_unshortener::state::AppState;

/// Pause before rebuilding the server after a fault, so a persistent bind
/// failure does not spin.
const RESTART_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let config = Config::parse();
    config.validate()?;
    config.print_summary();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("interrupt received, shutting down");
                break;
            }
            result = serve(&config) => {
                // serve only returns on a fault; rebuild and try again.
                if let Err(e) = result {
                    tracing::error!("server stopped: {e}");
                }
            }
        }

        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("interrupt received, shutting down");
                break;
            }
            _ = tokio::time::sleep(RESTART_DELAY) => {
                tracing::info!("restarting server");
            }
        }
    }

    Ok(())
}

/// Builds a fresh server instance and runs its accept loop.
async fn serve(config: &Config) -> Result<(), ServerError> {
    let probe = HttpRedirectProbe::new(config.probe_timeout())?;
    let service = UnshortenService::new(config.max_cache_size, Arc::new(probe));
    let state = AppState::new(Arc::new(service));

    let server = Server::bind(&config.socket_file, state)?;
    server.run().await
}
