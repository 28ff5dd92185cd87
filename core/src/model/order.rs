// shopfront/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::product::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
  pub fn new_v4() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl fmt::Display for OrderId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Confirmed,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Confirmed => "confirmed",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  pub id: OrderId,
  pub product_id: ProductId,
  pub email: String,
  /// Shipping or delivery location, when the customer gave one.
  pub location: Option<String>,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

impl Order {
  /// A confirmed order stamped with a fresh id and the current time.
  pub fn confirmed(product_id: ProductId, email: impl Into<String>, location: Option<String>) -> Self {
    Self {
      id: OrderId::new_v4(),
      product_id,
      email: email.into(),
      location,
      status: OrderStatus::Confirmed,
      created_at: Utc::now(),
    }
  }
}
