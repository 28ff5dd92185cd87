// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use shopfront::{
  ContextData, MemoryOrderStore, MemoryProductStore, Order, OrderStore, PipelineControl, PipelineError, Product,
  ProductId, ProductStore, StoreError, StoreResult,
};
use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Context Struct for pipeline tests ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub compensated: Vec<String>,
  pub should_stop_at: Option<String>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline framework error: {0:?}")]
  Pipeline(PipelineError),

  #[error("Test handler failed: {0}")]
  Handler(String),

  #[error("Test compensator failed: {0}")]
  Compensator(String),
}

impl From<PipelineError> for TestError {
  fn from(e: PipelineError) -> Self {
    TestError::Pipeline(e)
  }
}

// --- Common Handler Creators ---
pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> shopfront::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    let step_name_owned = step_name.to_string();
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name_owned.clone());
      tracing::debug!(target: "test_handlers", step = %step_name_owned, "executed, counter: {}, message: '{}'", guard.counter, guard.message);
      if guard.should_stop_at.as_deref() == Some(step_name_owned.as_str()) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> shopfront::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    let step_name_owned = step_name.to_string();
    let error_message_owned = error_message.to_string();
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name_owned.clone());
      tracing::warn!(target: "test_handlers", step = %step_name_owned, "failing with: '{}'", error_message_owned);
      Err(TestError::Handler(error_message_owned))
    })
  })
}

pub fn create_recording_compensator(step_name: &'static str) -> shopfront::Compensator<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter -= 1;
      guard.compensated.push(step_name.to_string());
      Ok(())
    })
  })
}

pub fn create_failing_compensator(
  step_name: &'static str,
  error_message: &'static str,
) -> shopfront::Compensator<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().compensated.push(format!("{step_name}!failed"));
      Err(TestError::Compensator(error_message.to_string()))
    })
  })
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Store fixtures ---

/// A product store seeded with one product holding `stock` units.
pub fn store_with_product(stock: i32) -> (Arc<MemoryProductStore>, ProductId) {
  let product = Product::new("Desk Lamp", 2_499, stock);
  let id = product.id;
  (Arc::new(MemoryProductStore::with_products([product])), id)
}

/// Wraps a `MemoryProductStore` and fails chosen operations on demand.
#[derive(Debug)]
pub struct FaultyProductStore {
  pub inner: Arc<MemoryProductStore>,
  pub fail_decrement: AtomicBool,
  pub fail_increment: AtomicBool,
  pub increment_calls: AtomicUsize,
}

impl FaultyProductStore {
  pub fn new(inner: Arc<MemoryProductStore>) -> Self {
    Self {
      inner,
      fail_decrement: AtomicBool::new(false),
      fail_increment: AtomicBool::new(false),
      increment_calls: AtomicUsize::new(0),
    }
  }

  pub fn failing_increment(inner: Arc<MemoryProductStore>) -> Self {
    let store = Self::new(inner);
    store.fail_increment.store(true, Ordering::SeqCst);
    store
  }
}

#[async_trait]
impl ProductStore for FaultyProductStore {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    self.inner.list().await
  }

  async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
    self.inner.get(id).await
  }

  async fn conditional_decrement(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    if self.fail_decrement.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("injected decrement failure".to_string()));
    }
    self.inner.conditional_decrement(id, amount).await
  }

  async fn increment(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    self.increment_calls.fetch_add(1, Ordering::SeqCst);
    if self.fail_increment.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("injected increment failure".to_string()));
    }
    self.inner.increment(id, amount).await
  }
}

/// An order store whose inserts fail while `failing` is set.
#[derive(Debug, Default)]
pub struct FlakyOrderStore {
  pub inner: MemoryOrderStore,
  pub failing: AtomicBool,
  pub insert_attempts: AtomicUsize,
}

impl FlakyOrderStore {
  pub fn always_failing() -> Self {
    let store = Self::default();
    store.failing.store(true, Ordering::SeqCst);
    store
  }
}

#[async_trait]
impl OrderStore for FlakyOrderStore {
  async fn insert(&self, order: &Order) -> StoreResult<()> {
    self.insert_attempts.fetch_add(1, Ordering::SeqCst);
    if self.failing.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("injected insert failure".to_string()));
    }
    self.inner.insert(order).await
  }

  async fn list_for_product(&self, product_id: ProductId) -> StoreResult<Vec<Order>> {
    self.inner.list_for_product(product_id).await
  }
}
