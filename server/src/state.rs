// shopfront_server/src/state.rs
use crate::config::AppConfig;
use shopfront::{OrderPlacement, OrderStore, PipelineError, ProductStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub products: Arc<dyn ProductStore>,
  pub placement: Arc<OrderPlacement>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires the order placement flow over the given stores.
  pub fn new(
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    config: Arc<AppConfig>,
  ) -> Result<Self, PipelineError> {
    let placement = OrderPlacement::new(Arc::clone(&products), orders)?;
    Ok(Self {
      products,
      placement: Arc::new(placement),
      config,
    })
  }
}
