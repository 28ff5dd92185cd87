// shopfront/src/model/mod.rs

//! Data structures for the storefront's two entities.

pub mod order;
pub mod product;

pub use order::{Order, OrderId, OrderStatus};
pub use product::{IdParseError, Product, ProductId};
