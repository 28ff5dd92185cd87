// shopfront_server/src/web/handlers/test_support.rs

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use once_cell::sync::Lazy;
use shopfront::{
  MemoryOrderStore, MemoryProductStore, Order, OrderStore, Product, ProductId, ProductStore, StoreError, StoreResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Barrier;
use tracing_subscriber::EnvFilter;

use crate::auth::Claims;
use crate::config::AppConfig;
use crate::state::AppState;

static TRACING: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

pub fn test_config() -> Arc<AppConfig> {
  config_with_secret(None)
}

pub fn config_with_secret(jwt_secret: Option<&str>) -> Arc<AppConfig> {
  let config = AppConfig::from_lookup(|key| match key {
    "DATABASE_URL" => Some("postgres://unused/test".to_string()),
    "JWT_SECRET" => jwt_secret.map(str::to_string),
    _ => None,
  })
  .expect("test config");
  Arc::new(config)
}

pub fn state_with(products: Arc<dyn ProductStore>, orders: Arc<dyn OrderStore>) -> AppState {
  AppState::new(products, orders, test_config()).expect("placement flow wiring")
}

pub fn memory_state(products: Vec<Product>) -> (AppState, Arc<MemoryProductStore>, Arc<MemoryOrderStore>) {
  memory_state_with_config(products, test_config())
}

/// Memory-backed state with the token guard switched on.
pub fn secured_memory_state(
  secret: &str,
  products: Vec<Product>,
) -> (AppState, Arc<MemoryProductStore>, Arc<MemoryOrderStore>) {
  memory_state_with_config(products, config_with_secret(Some(secret)))
}

fn memory_state_with_config(
  products: Vec<Product>,
  config: Arc<AppConfig>,
) -> (AppState, Arc<MemoryProductStore>, Arc<MemoryOrderStore>) {
  let product_store = Arc::new(MemoryProductStore::with_products(products));
  let order_store = Arc::new(MemoryOrderStore::default());
  let state = AppState::new(product_store.clone(), order_store.clone(), config).expect("placement flow wiring");
  (state, product_store, order_store)
}

/// Signs an HS256 token for `sub` that expires `expires_in_secs` from now (negative: already expired).
pub fn mint_token(secret: &str, sub: &str, expires_in_secs: i64) -> String {
  let now = Utc::now().timestamp();
  let claims = Claims {
    sub: sub.to_string(),
    exp: now + expires_in_secs,
    iat: now,
  };
  jsonwebtoken::encode(
    &Header::new(Algorithm::HS256),
    &claims,
    &EncodingKey::from_secret(secret.as_bytes()),
  )
  .expect("failed to encode jwt")
}

/// Order store whose inserts always fail.
#[derive(Debug, Default)]
pub struct RejectingOrderStore {
  pub insert_attempts: AtomicUsize,
}

#[async_trait]
impl OrderStore for RejectingOrderStore {
  async fn insert(&self, _order: &Order) -> StoreResult<()> {
    self.insert_attempts.fetch_add(1, Ordering::SeqCst);
    Err(StoreError::Unavailable("injected insert failure".to_string()))
  }

  async fn list_for_product(&self, _product_id: ProductId) -> StoreResult<Vec<Order>> {
    Ok(Vec::new())
  }
}

/// Product store that reserves normally but cannot release reservations.
#[derive(Debug)]
pub struct NoReleaseProductStore {
  pub inner: MemoryProductStore,
}

#[async_trait]
impl ProductStore for NoReleaseProductStore {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    self.inner.list().await
  }

  async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
    self.inner.get(id).await
  }

  async fn conditional_decrement(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    self.inner.conditional_decrement(id, amount).await
  }

  async fn increment(&self, _id: ProductId, _amount: u32) -> StoreResult<u64> {
    Err(StoreError::Unavailable("injected increment failure".to_string()))
  }
}

/// Holds every reservation until `parties` of them are waiting, then lets them race.
#[derive(Debug)]
pub struct GatedProductStore {
  pub inner: MemoryProductStore,
  gate: Barrier,
  pub waited: AtomicUsize,
}

impl GatedProductStore {
  pub fn new(inner: MemoryProductStore, parties: usize) -> Self {
    Self {
      inner,
      gate: Barrier::new(parties),
      waited: AtomicUsize::new(0),
    }
  }
}

#[async_trait]
impl ProductStore for GatedProductStore {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    self.inner.list().await
  }

  async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
    self.inner.get(id).await
  }

  async fn conditional_decrement(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    self.waited.fetch_add(1, Ordering::SeqCst);
    self.gate.wait().await;
    self.inner.conditional_decrement(id, amount).await
  }

  async fn increment(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    self.inner.increment(id, amount).await
  }
}
