// shopfront/src/store/memory.rs

//! In-process stores guarded by `parking_lot::RwLock`.
//!
//! The conditional decrement checks and mutates under a single write guard, which gives
//! the same at-most-once-per-unit property as the SQL `UPDATE ... WHERE stock >= $n`.

use super::{OrderStore, ProductStore};
use crate::error::StoreResult;
use crate::model::{Order, Product, ProductId};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{event, Level};

#[derive(Debug, Default)]
pub struct MemoryProductStore {
  products: RwLock<HashMap<ProductId, Product>>,
}

impl MemoryProductStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
    let store = Self::new();
    for product in products {
      store.insert(product);
    }
    store
  }

  /// Adds or replaces a product.
  pub fn insert(&self, product: Product) {
    self.products.write().insert(product.id, product);
  }

  pub fn stock(&self, id: ProductId) -> Option<i32> {
    self.products.read().get(&id).map(|p| p.stock)
  }

  pub fn len(&self) -> usize {
    self.products.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.read().is_empty()
  }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    let mut products: Vec<Product> = self.products.read().values().cloned().collect();
    products.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(products)
  }

  async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
    Ok(self.products.read().get(&id).cloned())
  }

  async fn conditional_decrement(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    Ok(self.decrement_if_available(id, amount))
  }

  async fn increment(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    Ok(self.add_stock(id, amount))
  }
}

impl MemoryProductStore {
  fn decrement_if_available(&self, id: ProductId, amount: u32) -> u64 {
    let Ok(amount) = i32::try_from(amount) else {
      return 0;
    };
    let mut guard = self.products.write();
    match guard.get_mut(&id) {
      Some(product) if product.stock >= amount => {
        product.stock -= amount;
        product.updated_at = Utc::now();
        event!(Level::TRACE, product_id = %id, stock = product.stock, "Stock decremented.");
        1
      }
      _ => 0,
    }
  }

  fn add_stock(&self, id: ProductId, amount: u32) -> u64 {
    let amount = i32::try_from(amount).unwrap_or(i32::MAX);
    let mut guard = self.products.write();
    match guard.get_mut(&id) {
      Some(product) => {
        product.stock = product.stock.saturating_add(amount);
        product.updated_at = Utc::now();
        1
      }
      None => 0,
    }
  }
}

#[derive(Debug, Default)]
pub struct MemoryOrderStore {
  orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn all(&self) -> Vec<Order> {
    self.orders.read().clone()
  }

  pub fn len(&self) -> usize {
    self.orders.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.orders.read().is_empty()
  }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
  async fn insert(&self, order: &Order) -> StoreResult<()> {
    self.orders.write().push(order.clone());
    Ok(())
  }

  async fn list_for_product(&self, product_id: ProductId) -> StoreResult<Vec<Order>> {
    Ok(
      self
        .orders
        .read()
        .iter()
        .filter(|o| o.product_id == product_id)
        .cloned()
        .collect(),
    )
  }
}
