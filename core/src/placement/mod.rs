// shopfront/src/placement/mod.rs

//! The order placement flow: reserve one unit of stock, record the order, and release the
//! reservation once (best effort) if recording fails.
//!
//! The flow is a three-step `Pipeline`:
//!
//! | step | effect | compensator |
//! |---|---|---|
//! | `resolve_product_id` | parse the raw id; stop if it does not parse | none |
//! | `reserve_stock` | atomic conditional decrement; stop on zero matches | increment by one |
//! | `record_order` | insert a `Confirmed` order | none |
//!
//! There is no idempotency: two identical requests place two orders. A failed compensation
//! leaves stock decremented with no order; it is surfaced as `PlacementOutcome::Uncompensated`
//! and logged, never retried.

pub mod context;
pub mod outcome;
mod steps;

pub use context::{PlaceOrder, PlacementCtxData, PlacementStage};
pub use outcome::{PlacementAttempt, PlacementError, PlacementOutcome};

use crate::core::context_data::ContextData;
use crate::core::control::PipelineResult;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::store::{OrderStore, ProductStore};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const STEP_RESOLVE_PRODUCT_ID: &str = "resolve_product_id";
pub const STEP_RESERVE_STOCK: &str = "reserve_stock";
pub const STEP_RECORD_ORDER: &str = "record_order";

/// Units reserved per order.
pub const RESERVATION_UNITS: u32 = 1;

#[derive(Debug)]
pub struct OrderPlacement {
  pipeline: Pipeline<PlacementCtxData, PlacementError>,
}

impl OrderPlacement {
  /// Builds the flow over the given stores.
  pub fn new(products: Arc<dyn ProductStore>, orders: Arc<dyn OrderStore>) -> Result<Self, PipelineError> {
    let mut p = Pipeline::<PlacementCtxData, PlacementError>::new(&[
      (STEP_RESOLVE_PRODUCT_ID, false),
      (STEP_RESERVE_STOCK, false),
      (STEP_RECORD_ORDER, false),
    ]);

    p.on(STEP_RESOLVE_PRODUCT_ID, steps::resolve_product_id)?;

    let reserve_products = Arc::clone(&products);
    p.on(STEP_RESERVE_STOCK, move |ctx_data: ContextData<PlacementCtxData>| {
      steps::reserve_stock(Arc::clone(&reserve_products), ctx_data)
    })?;

    let release_products = products;
    p.compensate(STEP_RESERVE_STOCK, move |ctx_data: ContextData<PlacementCtxData>| {
      steps::release_reservation(Arc::clone(&release_products), ctx_data)
    })?;

    p.on(STEP_RECORD_ORDER, move |ctx_data: ContextData<PlacementCtxData>| {
      steps::record_order(Arc::clone(&orders), ctx_data)
    })?;

    Ok(Self { pipeline: p })
  }

  pub fn pipeline(&self) -> &Pipeline<PlacementCtxData, PlacementError> {
    &self.pipeline
  }

  /// Places one order and reports only the outcome.
  pub async fn place(&self, request: PlaceOrder) -> PlacementOutcome {
    self.attempt(request).await.outcome
  }

  /// Places one order and reports the outcome plus the final state of the attempt.
  #[instrument(
    name = "OrderPlacement::attempt",
    skip(self, request),
    fields(product_id = %request.product_id)
  )]
  pub async fn attempt(&self, request: PlaceOrder) -> PlacementAttempt {
    let ctx_data = ContextData::new(PlacementCtxData::new(request));
    let result = self.pipeline.run(ctx_data.clone()).await;
    let final_ctx = ctx_data.snapshot();

    let outcome = match result {
      PipelineResult::Completed => match final_ctx.order {
        Some(order) => {
          info!(order_id = %order.id, "Order placed.");
          PlacementOutcome::Placed(order)
        }
        None => {
          error!("Placement completed without an order record; reserved stock is not released.");
          PlacementOutcome::Uncompensated {
            cause: PipelineError::Internal("placement completed without an order record".to_string()).into(),
            compensation_errors: Vec::new(),
          }
        }
      },
      PipelineResult::Stopped { step } => {
        info!(%step, "Order rejected: product unknown or out of stock.");
        PlacementOutcome::Rejected
      }
      PipelineResult::Failed {
        step,
        error: cause,
        compensation,
      } => {
        if compensation.is_complete() {
          warn!(%step, error = %cause, undone = ?compensation.undone, "Order failed; reservation released.");
          PlacementOutcome::Compensated { cause }
        } else {
          let compensation_errors: Vec<PlacementError> = compensation.failed.into_iter().map(|(_, e)| e).collect();
          error!(
            %step,
            product_id = ?final_ctx.product_id,
            error = %cause,
            compensation_errors = ?compensation_errors,
            "Order failed and the reservation could not be released; stock remains decremented without an order."
          );
          PlacementOutcome::Uncompensated {
            cause,
            compensation_errors,
          }
        }
      }
    };

    PlacementAttempt {
      outcome,
      stage: final_ctx.stage,
      trail: final_ctx.trail,
    }
  }
}
