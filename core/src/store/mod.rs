// shopfront/src/store/mod.rs

//! Storage contracts consumed by the order placement flow and the HTTP layer.
//!
//! Implementations must make `ProductStore::conditional_decrement` a single atomic
//! filter-and-mutate: the existence/stock predicate and the decrement happen in one
//! indivisible operation. Concurrent callers rely on this and nothing else.

pub mod memory;

use crate::error::StoreResult;
use crate::model::{Order, Product, ProductId};
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
  /// All products, ordered by name.
  async fn list(&self) -> StoreResult<Vec<Product>>;

  async fn get(&self, id: ProductId) -> StoreResult<Option<Product>>;

  /// Decrements `stock` by `amount` iff the product exists and `stock >= amount`.
  ///
  /// Returns the number of products modified (0 or 1). Zero covers both an unknown id and
  /// insufficient stock; callers cannot tell the two apart.
  async fn conditional_decrement(&self, id: ProductId, amount: u32) -> StoreResult<u64>;

  /// Increments `stock` by `amount`. Used to compensate a reservation.
  async fn increment(&self, id: ProductId, amount: u32) -> StoreResult<u64>;
}

#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
  async fn insert(&self, order: &Order) -> StoreResult<()>;

  /// Orders placed against `product_id`, oldest first.
  async fn list_for_product(&self, product_id: ProductId) -> StoreResult<Vec<Order>>;
}
