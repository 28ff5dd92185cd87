// shopfront_server/src/models/order.rs

use chrono::{DateTime, Utc};
use shopfront::{Order, OrderId, OrderStatus, ProductId};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

// Mirrors `order_status_enum` in the migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, SqlxType)]
#[sqlx(type_name = "order_status_enum", rename_all = "lowercase")]
pub enum OrderStatusDb {
  Confirmed,
}

impl From<OrderStatus> for OrderStatusDb {
  fn from(status: OrderStatus) -> Self {
    match status {
      OrderStatus::Confirmed => OrderStatusDb::Confirmed,
    }
  }
}

impl From<OrderStatusDb> for OrderStatus {
  fn from(status: OrderStatusDb) -> Self {
    match status {
      OrderStatusDb::Confirmed => OrderStatus::Confirmed,
    }
  }
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
  pub id: Uuid,
  pub product_id: Uuid,
  pub email: String,
  pub location: Option<String>,
  pub status: OrderStatusDb,
  pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
  fn from(row: OrderRow) -> Self {
    Order {
      id: OrderId(row.id),
      product_id: ProductId(row.product_id),
      email: row.email,
      location: row.location,
      status: row.status.into(),
      created_at: row.created_at,
    }
  }
}
