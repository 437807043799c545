use std::net::SocketAddr;

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use trip_server::config::AppConfig;
use trip_server::fetch::{self, TripSource};
use trip_server::trias::{MockTriasClient, TriasClient, TriasConfig};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        // Startup continues; the board shows the message and every cycle
        // re-checks, so fixing the environment and restarting is enough.
        warn!("incomplete configuration: {e}");
    }

    let source = match &config.static_data {
        Some(path) => {
            info!(path = %path.display(), "serving canned TRIAS responses");
            TripSource::Static(MockTriasClient::new(path))
        }
        None => {
            let trias_config =
                TriasConfig::new(config.endpoint.as_str()).with_timeout(config.timeout_secs);
            TripSource::Live(TriasClient::new(trias_config).expect("Failed to create TRIAS client"))
        }
    };

    let board = fetch::board_handle();
    let state = AppState::new(board.clone(), config.title.as_str(), config.update_interval_secs);

    let (send_shutdown, recv_shutdown) = watch::channel(false);
    let fetch_job = fetch::spawn_fetch_job(config.clone(), source, board, recv_shutdown);

    let app = create_router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    info!("trip board listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(send_shutdown))
        .await
        .expect("server error");

    fetch_job.await.expect("fetch job panicked");
    info!("terminating");
}

/// Wait for SIGINT or SIGTERM, then tell the fetch job to stop.
async fn shutdown_signal(terminate_jobs: watch::Sender<bool>) {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("received Ctrl+C"),
        _ = terminate => info!("received terminate signal"),
    }
    terminate_jobs.send(true).ok();
}
