mod analysis;
mod reports;


use clap::{Parser, Subcommand};
use feedback_core::{AppConfig, LogFormat};
use tracing_subscriber::EnvFilter;

use crate::reports::ReportsCommands;

#[derive(Debug, Parser)]
#[command(name = "feedback")]
#[command(about = "Feedback collection and daily reporting")]
struct Cli {
    /// Enable debug log level
    #[arg(long, global = true, env = "DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the daily feedback analysis once
    Analysis {
        /// Abort the run after this many seconds (defaults to
        /// `FEEDBACK_ANALYSIS_TIMEOUT_SECS`)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Inspect recorded report runs
    Reports {
        #[command(subcommand)]
        command: ReportsCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Apply pending migrations
    Migrate,
    /// Check database connectivity
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("no command given; run `feedback --help` for usage");
        return Ok(());
    };

    let config = feedback_core::load_app_config()?;
    init_tracing(&config, cli.debug)?;

    let pool_config = feedback_db::PoolConfig::from_app_config(&config);
    let pool = feedback_db::connect_pool(&config.database_url, pool_config).await?;

    let result = dispatch(command, &pool, &config).await;
    pool.close().await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "an irrecoverable error occurred");
    }
    result
}

async fn dispatch(
    command: Commands,
    pool: &sqlx::PgPool,
    config: &AppConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Analysis { timeout_secs } => {
            analysis::run_analysis(pool.clone(), config, timeout_secs).await
        }
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let applied = feedback_db::run_migrations(pool).await?;
            println!("migrations applied: {applied}");
            Ok(())
        }
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            feedback_db::health_check(pool).await?;
            println!("database ok");
            Ok(())
        }
        Commands::Reports {
            command: ReportsCommands::List { limit },
        } => reports::run_reports_list(pool, limit).await,
    }
}

fn init_tracing(config: &AppConfig, debug: bool) -> anyhow::Result<()> {
    let env_filter = if debug {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?
    };

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(env_filter).init(),
    }
    Ok(())
}
