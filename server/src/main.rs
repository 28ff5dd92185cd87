// shopfront_server/src/main.rs

mod auth;
mod config;
mod db;
mod errors;
mod models;
mod state;
mod web;

use crate::config::AppConfig;
use crate::db::{PgOrderStore, PgProductStore};
use crate::errors::AppError;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

/// Connects to storage, applies migrations, optionally seeds, and wires the order flow.
async fn bootstrap(config: Arc<AppConfig>) -> Result<AppState, AppError> {
  let pool = db::connect_with_retry(&config).await?;
  db::run_migrations(&pool).await?;

  if config.seed_db {
    db::seed::seed_if_empty(&pool).await?;
  }

  let products = Arc::new(PgProductStore::new(pool.clone()));
  let orders = Arc::new(PgOrderStore::new(pool));
  let state = AppState::new(products, orders, config)?;
  tracing::info!(steps = ?state.placement.pipeline().step_names(), "Order placement flow ready.");
  Ok(state)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting shopfront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let app_state = match bootstrap(app_config.clone()).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise the application.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
