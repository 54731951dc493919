//! WhatsApp LLM Dashboard - Main entry point
//!
//! Read-only web dashboard over the WhatsApp LLM application's database.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use whatsapp_dashboard::admin::AppState;
use whatsapp_dashboard::config::{self, Config};
use whatsapp_dashboard::db::Database;
use whatsapp_dashboard::server::run_server;
use whatsapp_dashboard::store::{DashboardStore, MemoryStore, PgStore};

/// WhatsApp LLM Dashboard - Browse groups, senders, messages and KB topics
#[derive(Parser)]
#[command(name = "dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (optional; environment variables suffice)
    #[arg(short, long, default_value_os_t = Config::default_path())]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        listen: Option<SocketAddr>,

        /// Serve built-in sample data instead of connecting to the database
        #[arg(long)]
        demo: bool,
    },

    /// Generate a default configuration file
    InitConfig {
        /// Output path (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    match cli.command {
        Commands::Serve { listen, demo } => {
            let config = Config::load(Some(cli.config.as_path()))?;
            match &config.logging.dir {
                Some(dir) => init_daemon_logging(dir, filter)?,
                None => init_cli_logging(filter),
            }
            serve(config, listen, demo).await
        }
        Commands::InitConfig { output } => {
            init_cli_logging(filter);
            generate_config(output)
        }
    }
}

/// Initialize logging to stdout only.
fn init_cli_logging(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

/// Initialize logging to stdout and a daily-rotated file.
fn init_daemon_logging(log_dir: &Path, filter: EnvFilter) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    // e.g. dashboard.2026-01-15.log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("dashboard")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create log file appender")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The writer must outlive every span; the process exits right after serve.
    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    info!("Logging to: {}", log_dir.display());
    Ok(())
}

/// Run the dashboard web server
async fn serve(config: Config, listen_override: Option<SocketAddr>, demo: bool) -> Result<()> {
    let listen_addr: SocketAddr = match listen_override {
        Some(addr) => addr,
        None => config
            .http
            .listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", config.http.listen_addr))?,
    };

    if config.auth.password == "password" {
        warn!("Using the default Basic Auth password; set WHATSAPP_BASIC_AUTH_PASSWORD");
    }

    let database = if demo {
        warn!("DEMO MODE: serving built-in sample data, the database is not used");
        None
    } else {
        Some(Database::connect(&config.database).await?)
    };

    let store: Arc<dyn DashboardStore> = match &database {
        Some(db) => Arc::new(PgStore::new(db.pool())),
        None => Arc::new(MemoryStore::sample()),
    };

    info!(
        username = %config.auth.username,
        whatsapp_host = %config.whatsapp_host,
        "WhatsApp LLM Dashboard starting"
    );

    let state = Arc::new(AppState::new(store, &config));
    let result = run_server(listen_addr, state).await;

    if let Some(db) = database {
        db.close().await;
    }

    result
}

fn generate_config(output: Option<PathBuf>) -> Result<()> {
    let config = config::default_config_template();

    match output {
        Some(path) => {
            std::fs::write(&path, &config)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Configuration written to: {}", path.display());
        }
        None => {
            print!("{config}");
        }
    }

    Ok(())
}
