// shopfront_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  // Pool and startup connection behaviour
  pub db_max_connections: u32,
  pub db_connect_attempts: u32,
  pub db_connect_retry_delay: Duration,
  pub db_connect_timeout: Duration,

  // Insert demo products on startup when the catalogue is empty
  pub seed_db: bool,

  // HS256 secret for the token guard; unset leaves storefront routes open
  pub jwt_secret: Option<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let config = Self::from_lookup(|var_name| env::var(var_name).ok())?;
    tracing::info!(
      server_host = %config.server_host,
      server_port = config.server_port,
      seed_db = config.seed_db,
      auth_enabled = config.jwt_secret.is_some(),
      "Application configuration loaded successfully."
    );
    Ok(config)
  }

  /// Builds the configuration from any variable source. `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = parse_or(&lookup, "SERVER_PORT", 8080u16)?;
    let database_url = lookup("DATABASE_URL")
      .ok_or_else(|| AppError::Config("Missing environment variable 'DATABASE_URL'".to_string()))?;

    let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32)?;
    let db_connect_attempts = parse_or(&lookup, "DB_CONNECT_ATTEMPTS", 5u32)?;
    if db_connect_attempts == 0 {
      return Err(AppError::Config("DB_CONNECT_ATTEMPTS must be at least 1".to_string()));
    }
    let db_connect_retry_delay = Duration::from_secs(parse_or(&lookup, "DB_CONNECT_RETRY_DELAY_SECS", 3u64)?);
    let db_connect_timeout = Duration::from_secs(parse_or(&lookup, "DB_CONNECT_TIMEOUT_SECS", 5u64)?);

    let seed_db = parse_or(&lookup, "SEED_DB", false)?;
    let jwt_secret = lookup("JWT_SECRET").filter(|s| !s.trim().is_empty());

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      db_connect_attempts,
      db_connect_retry_delay,
      db_connect_timeout,
      seed_db,
      jwt_secret,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_or<F, T>(lookup: &F, var_name: &str, default: T) -> Result<T>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match lookup(var_name) {
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
    None => Ok(default),
  }
}
