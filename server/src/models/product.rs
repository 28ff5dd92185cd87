// shopfront_server/src/models/product.rs

use chrono::{DateTime, Utc};
use shopfront::{Product, ProductId};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>, // Description can be optional
  pub price_cents: i32,
  pub stock: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: ProductId(row.id),
      name: row.name,
      description: row.description,
      price_cents: row.price_cents,
      stock: row.stock,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}
