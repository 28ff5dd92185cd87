// shopfront_server/src/db/seed.rs

use anyhow::Context;
use shopfront::Product;
use sqlx::PgPool;
use tracing::{info, instrument};

fn demo_catalogue() -> Vec<Product> {
  vec![
    Product::new("Canvas Tote", 1800, 25).with_description("Heavy cotton tote bag."),
    Product::new("Ceramic Mug", 1200, 40).with_description("350ml stoneware mug."),
    Product::new("Limited Print", 4500, 3).with_description("Signed print, small run."),
    Product::new("Wool Beanie", 2200, 0).with_description("Restocking soon."),
  ]
}

/// Inserts the demo catalogue when `products` is empty. Returns the number of rows inserted.
#[instrument(name = "db::seed_if_empty", skip(pool), err)]
pub async fn seed_if_empty(pool: &PgPool) -> anyhow::Result<u64> {
  let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
    .fetch_one(pool)
    .await
    .context("Failed to count products")?;
  if existing > 0 {
    info!(existing, "Products table already populated; skipping seed.");
    return Ok(0);
  }

  let mut tx = pool.begin().await.context("Failed to open seed transaction")?;
  let mut inserted = 0u64;
  for product in demo_catalogue() {
    let result = sqlx::query(
      "INSERT INTO products (id, name, description, price_cents, stock, created_at, updated_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(product.id.as_uuid())
    .bind(&product.name)
    .bind(product.description.as_deref())
    .bind(product.price_cents)
    .bind(product.stock)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(&mut *tx)
    .await
    .with_context(|| format!("Failed to insert seed product '{}'", product.name))?;
    inserted += result.rows_affected();
  }
  tx.commit().await.context("Failed to commit seed transaction")?;

  info!(inserted, "Seeded demo products.");
  Ok(inserted)
}
