use std::sync::Arc;

use anyhow::Result;
use plant_ai::{Assistant, TranscriptParser};
use plant_requirements::{DataCache, MajorDirectory, SystemClock};
use sqlx::SqlitePool;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{config::Config, routes::AppState, services};

/// Wires the commands, the reference data cache and the model clients.
pub fn app_state(config: Config, read_pool: SqlitePool, write_pool: SqlitePool) -> Result<AppState> {
    let source = services::data_source(&config.data)?;
    let data = DataCache::new(source.clone(), Arc::new(SystemClock), config.data.cache_ttl());

    let transcript = services::generative_model(&config.ai, &config.ai.api_key)?.map(TranscriptParser::new);
    let assistant = services::generative_model(&config.ai, config.ai.assistant_key())?.map(Assistant::new);
    if transcript.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set, transcript parsing is disabled");
    }
    if assistant.is_none() {
        tracing::warn!("no assistant API key set, the assistant is disabled");
    }

    let state = plant_shared::State {
        read_db: read_pool.clone(),
        write_db: write_pool,
    };

    Ok(AppState {
        config,
        pool: read_pool,
        user_command: plant_user::Command::new(state.clone()),
        plan_command: plant_plan::Command::new(state),
        data: Arc::new(data),
        majors: Arc::new(MajorDirectory::new(source)),
        transcript,
        assistant,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}

#[tracing::instrument(skip(config))]
pub async fn serve(config: Config, host_override: Option<String>, port_override: Option<u16>) -> Result<()> {
    tracing::info!("Starting plant server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // The write pool creates the database file, so it must come first.
    let write_pool = crate::db::create_write_pool(&config.database.url).await?;
    let read_pool = crate::db::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let state = app_state(config, read_pool.clone(), write_pool.clone())?;

    let app = crate::routes::router(state)
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}
