// shopfront/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Opaque product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Uuid);

impl ProductId {
  pub fn new_v4() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for ProductId {
  fn from(id: Uuid) -> Self {
    Self(id)
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

/// Text that is not a valid identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid identifier '{input}'")]
pub struct IdParseError {
  pub input: String,
}

impl FromStr for ProductId {
  type Err = IdParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(Self).map_err(|_| IdParseError { input: s.to_string() })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub description: Option<String>,
  /// Price in minor currency units. Never negative.
  pub price_cents: i32,
  /// Units on hand. Never negative; only changed by conditional decrement / compensating increment.
  pub stock: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  /// Builds a fresh product with a new id, for seeding and tests.
  pub fn new(name: impl Into<String>, price_cents: i32, stock: i32) -> Self {
    let now = Utc::now();
    Self {
      id: ProductId::new_v4(),
      name: name.into(),
      description: None,
      price_cents: price_cents.max(0),
      stock: stock.max(0),
      created_at: now,
      updated_at: now,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn in_stock(&self) -> bool {
    self.stock > 0
  }
}
