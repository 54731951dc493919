//! Database connection management.
//!
//! The dashboard reads tables owned by the main WhatsApp LLM application and
//! never runs migrations of its own; it only opens a pooled PostgreSQL
//! connection and hands clones of the pool to the store.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub use sqlx::PgPool as DbPool;

/// Shared database for the dashboard.
///
/// Created once at startup and shared with the store; the pool itself is
/// cheap to clone.
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Connect to PostgreSQL using the configured URL.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = normalize_url(config.url()?);
        let options = PgConnectOptions::from_str(&url).context("Invalid database URL")?;

        let host = options.get_host().to_string();
        let port = options.get_port();
        let database = options.get_database().unwrap_or_default().to_string();

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await
            .context("Failed to connect to PostgreSQL database")?;

        info!(
            host = %host,
            port,
            database = %database,
            max_connections = config.max_connections,
            "Database connected"
        );

        Ok(Self { pool })
    }

    /// Get a clone of the connection pool.
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Strip a driver suffix (`+asyncpg`, `+psycopg`) from the URL scheme.
///
/// The main application configures `DB_URI` for its async driver
/// (`postgresql+asyncpg://...`); sqlx only understands the bare scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    match url.split_once("://") {
        Some((scheme, rest)) => match scheme.split_once('+') {
            Some((base, _driver)) => format!("{base}://{rest}"),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}
