// shopfront_server/src/db/stores.rs

use async_trait::async_trait;
use shopfront::{Order, OrderStore, Product, ProductId, ProductStore, StoreError, StoreResult};
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::models::{OrderRow, OrderStatusDb, ProductRow};

fn units(amount: u32) -> StoreResult<i32> {
  i32::try_from(amount).map_err(StoreError::backend)
}

#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProductStore for PgProductStore {
  async fn list(&self) -> StoreResult<Vec<Product>> {
    let rows: Vec<ProductRow> = sqlx::query_as(
      "SELECT id, name, description, price_cents, stock, created_at, updated_at FROM products ORDER BY name ASC",
    )
    .fetch_all(&self.pool)
    .await
    .map_err(StoreError::backend)?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(
      "SELECT id, name, description, price_cents, stock, created_at, updated_at FROM products WHERE id = $1",
    )
    .bind(id.as_uuid())
    .fetch_optional(&self.pool)
    .await
    .map_err(StoreError::backend)?;
    Ok(row.map(Product::from))
  }

  // The stock predicate and the decrement run as one statement under the row lock.
  #[instrument(name = "PgProductStore::conditional_decrement", skip(self), err)]
  async fn conditional_decrement(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    let amount = units(amount)?;
    let result = sqlx::query("UPDATE products SET stock = stock - $2, updated_at = NOW() WHERE id = $1 AND stock >= $2")
      .bind(id.as_uuid())
      .bind(amount)
      .execute(&self.pool)
      .await
      .map_err(StoreError::backend)?;
    debug!(rows_affected = result.rows_affected(), "Conditional decrement executed.");
    Ok(result.rows_affected())
  }

  #[instrument(name = "PgProductStore::increment", skip(self), err)]
  async fn increment(&self, id: ProductId, amount: u32) -> StoreResult<u64> {
    let amount = units(amount)?;
    let result = sqlx::query("UPDATE products SET stock = stock + $2, updated_at = NOW() WHERE id = $1")
      .bind(id.as_uuid())
      .bind(amount)
      .execute(&self.pool)
      .await
      .map_err(StoreError::backend)?;
    Ok(result.rows_affected())
  }
}

#[derive(Debug, Clone)]
pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl OrderStore for PgOrderStore {
  #[instrument(name = "PgOrderStore::insert", skip(self, order), fields(order_id = %order.id), err)]
  async fn insert(&self, order: &Order) -> StoreResult<()> {
    sqlx::query(
      "INSERT INTO orders (id, product_id, email, location, status, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(order.id.as_uuid())
    .bind(order.product_id.as_uuid())
    .bind(&order.email)
    .bind(order.location.as_deref())
    .bind(OrderStatusDb::from(order.status))
    .bind(order.created_at)
    .execute(&self.pool)
    .await
    .map_err(StoreError::backend)?;
    Ok(())
  }

  async fn list_for_product(&self, product_id: ProductId) -> StoreResult<Vec<Order>> {
    let rows: Vec<OrderRow> = sqlx::query_as(
      "SELECT id, product_id, email, location, status, created_at FROM orders WHERE product_id = $1 ORDER BY created_at ASC",
    )
    .bind(product_id.as_uuid())
    .fetch_all(&self.pool)
    .await
    .map_err(StoreError::backend)?;
    Ok(rows.into_iter().map(Order::from).collect())
  }
}
