// src/lib.rs

//! Shopfront: the domain core of a small e-commerce storefront.
//!
//! The crate provides:
//!  - The `Product` / `Order` data model with typed identifiers.
//!  - Async storage contracts (`ProductStore`, `OrderStore`) plus in-memory implementations.
//!  - A small compensating step pipeline: named steps, async handlers operating on shared
//!    `ContextData`, early stopping, and reverse-order compensation of completed steps
//!    when a later step fails.
//!  - The order placement flow built on that pipeline: an atomic conditional stock
//!    reservation, an order insert, and a single best-effort compensation.

pub mod core;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod placement;
pub mod store;

// --- Re-exports for the Public API ---

// Pipeline building blocks
pub use crate::core::context::{Compensator, Handler};
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{Compensation, PipelineControl, PipelineResult};
pub use crate::core::step::StepDef;
pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{PipelineError, StoreError, StoreResult};

// Domain
pub use crate::model::{IdParseError, Order, OrderId, OrderStatus, Product, ProductId};
pub use crate::placement::{
  OrderPlacement, PlaceOrder, PlacementAttempt, PlacementError, PlacementOutcome, PlacementStage,
};
pub use crate::store::memory::{MemoryOrderStore, MemoryProductStore};
pub use crate::store::{OrderStore, ProductStore};
