use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{info, warn};

use zyntra_api::AppStateInner;
use zyntra_db::Database;
use zyntra_server::config::Config;
use zyntra_types::sample::chat_conversations;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    zyntra_server::init_tracing();

    let config = Config::from_env();
    let addr = config.listen_addr()?;

    let db = Arc::new(Database::open(&config.db_path, config.db_readers)?);

    // Demo inbox, frozen relative to startup.
    let conversations = chat_conversations(chrono::Utc::now());
    let state = Arc::new(AppStateInner::new(db, config.environment.clone(), conversations));

    let app = zyntra_api::router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Zyntra API listening on {} ({})", addr, config.environment);

    // Once a signal arrives, in-flight requests get `shutdown_timeout` to finish.
    let stop = Arc::new(Notify::new());
    let shutdown_timeout = config.shutdown_timeout;
    tokio::spawn({
        let stop = stop.clone();
        async move {
            shutdown_signal().await;
            stop.notify_one();
            tokio::time::sleep(shutdown_timeout).await;
            warn!("Graceful shutdown exceeded {:?}, exiting", shutdown_timeout);
            std::process::exit(1);
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { stop.notified().await })
        .await?;

    info!("Zyntra API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    () = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await;
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("Received Ctrl+C, shutting down...");
    }
}
