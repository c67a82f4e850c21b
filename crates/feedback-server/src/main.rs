mod middleware;
mod pages;
mod routes;
mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use feedback_analysis::Aggregator;
use feedback_core::{AppConfig, LogFormat};
use tokio_cron_scheduler::JobScheduler;
use tracing_subscriber::EnvFilter;

use crate::{
    middleware::RateLimitState,
    routes::{build_app, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = feedback_core::load_app_config()?;
    init_tracing(&config)?;
    tracing::debug!(?config, "configuration loaded");

    let pool_config = feedback_db::PoolConfig::from_app_config(&config);
    let pool = feedback_db::connect_pool(&config.database_url, pool_config).await?;

    let scheduler = start_scheduler(&config, pool.clone()).await?;

    let app = build_app(
        AppState {
            pool,
            max_message_length: config.max_message_length,
        },
        &config.static_path,
        RateLimitState::per_minute(config.submit_rate_limit),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        static_path = %config.static_path.display(),
        "starting HTTP server"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    tracing::info!("HTTP server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(env_filter).init(),
    }
    Ok(())
}

async fn start_scheduler(
    config: &AppConfig,
    pool: sqlx::PgPool,
) -> anyhow::Result<Option<JobScheduler>> {
    let Some(schedule) = config.analysis_schedule.as_deref() else {
        tracing::info!("FEEDBACK_ANALYSIS_SCHEDULE not set; in-process analysis disabled");
        return Ok(None);
    };

    let settings = config.asana()?;
    let aggregator = Arc::new(Aggregator::from_settings(pool, &settings)?);
    let deadline = Duration::from_secs(config.analysis_timeout_secs);

    let scheduler = scheduler::build_scheduler(schedule, aggregator, deadline).await?;
    Ok(Some(scheduler))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
