// shopfront/examples/place_order.rs

use shopfront::{MemoryOrderStore, MemoryProductStore, OrderPlacement, PipelineError, PlaceOrder, PlacementOutcome, Product};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Order Placement Example ---");

  // 1. A catalogue with two units of one product
  let product = Product::new("Enamel Pin", 900, 2);
  let product_id = product.id;
  let products = Arc::new(MemoryProductStore::with_products(vec![product]));
  let orders = Arc::new(MemoryOrderStore::default());

  // 2. Wire the flow over the stores
  let placement = OrderPlacement::new(products.clone(), orders.clone())?;

  // 3. Three customers try to buy; the third finds it sold out
  for email in ["ada@example.com", "grace@example.com", "linus@example.com"] {
    let request = PlaceOrder::new(product_id.to_string(), email).with_location("Lisbon");
    match placement.place(request).await {
      PlacementOutcome::Placed(order) => info!(%email, order_id = %order.id, "Placed."),
      PlacementOutcome::Rejected => info!(%email, "Sold out."),
      other => info!(%email, outcome = ?other, "Failed."),
    }
  }

  info!(stock = ?products.stock(product_id), orders = orders.len(), "Final state.");
  Ok(())
}
