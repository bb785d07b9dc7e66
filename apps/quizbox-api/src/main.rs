use anyhow::Result;
use quizbox_api::{AppState, build_router, config::ApiConfig};
use quizbox_db::{DbConfig, init_db};
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() -> Option<WorkerGuard> {
    let (file_layer, guard) = match std::env::var("LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let file_appender = tracing_appender::rolling::daily(dir.trim(), "quizbox-api.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizbox_api=debug,quizbox_db=info,tower_http=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stdout))
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: no .env file loaded: {}", e);
    }

    let _guard = init_tracing();

    let config = ApiConfig::load()?;
    let db_config = match &config.database_url {
        Some(url) => DbConfig::Url(url.clone()),
        None => DbConfig::from_env()?,
    };

    tracing::info!("quizbox-api {} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database: {}", db_config.display_target());
    tracing::info!("Static bundle: {}", config.static_dir.display());
    if config.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN is not set; admin routes will answer 503");
    }

    let pool = init_db(&db_config, 10).await?;
    let listen_addr = config.listen_addr;
    let app = build_router(AppState::new(pool.clone(), config));

    tracing::info!("Listening on {}", listen_addr);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}
