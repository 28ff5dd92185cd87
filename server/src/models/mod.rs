// shopfront_server/src/models/mod.rs

//! Row types mapping the PostgreSQL tables onto the domain model.

pub mod order;
pub mod product;

pub use order::{OrderRow, OrderStatusDb};
pub use product::ProductRow;
