mod cli;
mod server;

use std::sync::Arc;

use axum::http::HeaderValue;
use clap::Parser;
use eyre::WrapErr;

use valant_core::notify::{self, EventReceiver};
use valant_core::store::{InventoryStore, MemoryStore};
use valant_core::InventoryService;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let store = match &args.data_file {
        Some(path) => {
            let store = MemoryStore::with_persistence(path).context("load item data file")?;
            let count = store
                .find_all()
                .await
                .context("read loaded items")?
                .len();
            tracing::info!(path = %path.display(), items = count, "loaded persisted items");
            store
        }
        None => MemoryStore::new(),
    };

    // Removal events are drained by a background task until every
    // publisher (held by the router state) is dropped at shutdown.
    let (notifier, events) = notify::channel(args.notify_capacity);
    let event_log = tokio::spawn(log_events(events));

    let cors_origin = args
        .cors_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("parse --cors-origin")?;

    let state = server::AppState {
        inventory: InventoryService::new(Arc::new(store), Arc::new(notifier)),
    };
    let router = server::build_router(state, cors_origin);

    let bind_addr = format!("{}:{}", args.bind, args.port);
    if args.bind == "0.0.0.0" {
        tracing::warn!("server is bound to 0.0.0.0; it is accessible from the network");
    }

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("bind TCP listener")?;

    tracing::info!("listening on {bind_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("run HTTP server")?;

    event_log.await.context("join event log task")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn log_events(mut events: EventReceiver) {
    while let Some(event) = events.recv().await {
        let item = event.item();
        tracing::info!(
            action = event.action(),
            id = %item.id,
            label = %item.label,
            "item event"
        );
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
