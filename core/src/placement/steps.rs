// shopfront/src/placement/steps.rs

//! Handlers and the compensator of the placement pipeline.

use super::context::{PlacementCtxData, PlacementStage};
use super::outcome::PlacementError;
use super::RESERVATION_UNITS;
use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::error::PipelineError;
use crate::model::{Order, ProductId};
use crate::store::{OrderStore, ProductStore};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Parses the raw identifier. Unparseable input ends the attempt exactly like an unknown product.
#[instrument(name = "placement_step::resolve_product_id", skip_all)]
pub(crate) async fn resolve_product_id(
  ctx_data: ContextData<PlacementCtxData>,
) -> Result<PipelineControl, PlacementError> {
  let mut guard = ctx_data.write();
  guard.advance(PlacementStage::Reserving);
  let parsed = guard.request.product_id.parse::<ProductId>();
  match parsed {
    Ok(product_id) => {
      guard.product_id = Some(product_id);
      Ok(PipelineControl::Continue)
    }
    Err(e) => {
      debug!(error = %e, "Product id does not parse; treating as not found.");
      guard.advance(PlacementStage::RejectedNoStock);
      Ok(PipelineControl::Stop)
    }
  }
}

/// Atomically takes one unit of stock. Zero matches stops the attempt.
#[instrument(name = "placement_step::reserve_stock", skip_all)]
pub(crate) async fn reserve_stock(
  products: Arc<dyn ProductStore>,
  ctx_data: ContextData<PlacementCtxData>,
) -> Result<PipelineControl, PlacementError> {
  let product_id = ctx_data.with(|c| c.product_id);
  let Some(product_id) = product_id else {
    return Err(PipelineError::Internal("reserve_stock ran before the product id was resolved".to_string()).into());
  };

  match products.conditional_decrement(product_id, RESERVATION_UNITS).await {
    Ok(0) => {
      info!(%product_id, "No stock reserved: product unknown or sold out.");
      ctx_data.write().advance(PlacementStage::RejectedNoStock);
      Ok(PipelineControl::Stop)
    }
    Ok(_) => {
      debug!(%product_id, "Reserved one unit of stock.");
      ctx_data.write().advance(PlacementStage::Reserved);
      Ok(PipelineControl::Continue)
    }
    Err(e) => {
      // Reported to the caller the same way as an empty match.
      warn!(%product_id, error = %e, "Stock reservation failed at the storage layer.");
      ctx_data.write().advance(PlacementStage::RejectedNoStock);
      Ok(PipelineControl::Stop)
    }
  }
}

/// Persists a confirmed order for the reserved unit.
#[instrument(name = "placement_step::record_order", skip_all)]
pub(crate) async fn record_order(
  orders: Arc<dyn OrderStore>,
  ctx_data: ContextData<PlacementCtxData>,
) -> Result<PipelineControl, PlacementError> {
  let order = {
    let mut guard = ctx_data.write();
    guard.advance(PlacementStage::Recording);
    match guard.product_id {
      Some(product_id) => Some(Order::confirmed(
        product_id,
        guard.request.email.clone(),
        guard.request.location.clone(),
      )),
      None => None,
    }
  };
  let Some(order) = order else {
    return Err(PipelineError::Internal("record_order ran without a reserved product".to_string()).into());
  };

  match orders.insert(&order).await {
    Ok(()) => {
      info!(order_id = %order.id, product_id = %order.product_id, "Order recorded.");
      let mut guard = ctx_data.write();
      guard.order = Some(order);
      guard.advance(PlacementStage::Committed);
      Ok(PipelineControl::Continue)
    }
    Err(e) => {
      warn!(product_id = %order.product_id, error = %e, "Order insert failed.");
      ctx_data.write().advance(PlacementStage::RecordingFailed);
      Err(e.into())
    }
  }
}

/// Gives the reserved unit back. Runs once; the matched count is not checked.
#[instrument(name = "placement_step::release_reservation", skip_all)]
pub(crate) async fn release_reservation(
  products: Arc<dyn ProductStore>,
  ctx_data: ContextData<PlacementCtxData>,
) -> Result<(), PlacementError> {
  let product_id = {
    let mut guard = ctx_data.write();
    guard.advance(PlacementStage::Compensating);
    guard.product_id
  };
  let result = match product_id {
    Some(product_id) => products
      .increment(product_id, RESERVATION_UNITS)
      .await
      .map(|_| ())
      .map_err(PlacementError::from),
    None => Err(PipelineError::Internal("no reservation to release".to_string()).into()),
  };
  ctx_data.write().advance(PlacementStage::CompensationDone);
  result
}
