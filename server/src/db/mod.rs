// shopfront_server/src/db/mod.rs

//! PostgreSQL plumbing: the startup connection loop, migrations, seed data and the
//! sqlx-backed store implementations.

pub mod seed;
pub mod stores;

pub use stores::{PgOrderStore, PgProductStore};

use crate::config::AppConfig;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

/// Connects to the database, retrying a fixed number of times while it comes up.
///
/// Each attempt opens a pool with an acquire timeout and pings it with `SELECT 1`.
/// The last error is returned once every attempt has failed.
#[instrument(name = "db::connect_with_retry", skip(config), fields(attempts = config.db_connect_attempts))]
pub async fn connect_with_retry(config: &AppConfig) -> anyhow::Result<PgPool> {
  let attempts = config.db_connect_attempts.max(1);
  let mut last_error: Option<sqlx::Error> = None;

  for attempt in 1..=attempts {
    match try_connect(config).await {
      Ok(pool) => {
        info!(attempt, "Successfully connected to the database.");
        return Ok(pool);
      }
      Err(e) => {
        warn!(error = %e, "Waiting for database... (attempt {}/{})", attempt, attempts);
        last_error = Some(e);
        if attempt < attempts {
          tokio::time::sleep(config.db_connect_retry_delay).await;
        }
      }
    }
  }

  match last_error {
    Some(e) => Err(e).with_context(|| format!("Failed to connect to the database after {} attempts", attempts)),
    None => Err(anyhow::anyhow!("No database connection attempt was made")),
  }
}

async fn try_connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .acquire_timeout(config.db_connect_timeout)
    .connect(&config.database_url)
    .await?;
  sqlx::query("SELECT 1").execute(&pool).await?;
  Ok(pool)
}

/// Applies the embedded migrations under `server/migrations`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
  sqlx::migrate!("./migrations")
    .run(pool)
    .await
    .context("Failed to apply database migrations")?;
  info!("Database migrations applied.");
  Ok(())
}
