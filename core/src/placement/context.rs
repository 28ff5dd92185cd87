// shopfront/src/placement/context.rs

//! Context data threaded through the placement pipeline's steps.

use crate::model::{Order, ProductId};
use tracing::warn;

/// A request to place one order for one unit of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
  /// Raw identifier as received (e.g. a URL path segment). Parsed by the flow.
  pub product_id: String,
  pub email: String,
  pub location: Option<String>,
}

impl PlaceOrder {
  pub fn new(product_id: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      product_id: product_id.into(),
      email: email.into(),
      location: None,
    }
  }

  pub fn with_location(mut self, location: impl Into<String>) -> Self {
    self.location = Some(location.into());
    self
  }
}

/// Where a single placement attempt is in its state machine.
///
/// `Start → Reserving → {Reserved, RejectedNoStock}`,
/// `Reserved → Recording → {Committed, RecordingFailed}`,
/// `RecordingFailed → Compensating → CompensationDone`.
///
/// Resolving the raw product id is part of `Reserving`: an id that does not parse ends
/// in `RejectedNoStock` from there, like an unknown product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStage {
  Start,
  Reserving,
  Reserved,
  RejectedNoStock,
  Recording,
  Committed,
  RecordingFailed,
  Compensating,
  CompensationDone,
}

impl PlacementStage {
  pub fn is_terminal(&self) -> bool {
    matches!(
      self,
      PlacementStage::RejectedNoStock | PlacementStage::Committed | PlacementStage::CompensationDone
    )
  }

  /// Whether `next` is a legal successor of this stage.
  pub fn can_advance_to(&self, next: PlacementStage) -> bool {
    use PlacementStage::*;
    matches!(
      (*self, next),
      (Start, Reserving)
        | (Reserving, Reserved)
        | (Reserving, RejectedNoStock)
        | (Reserved, Recording)
        | (Recording, Committed)
        | (Recording, RecordingFailed)
        | (RecordingFailed, Compensating)
        | (Compensating, CompensationDone)
    )
  }
}

#[derive(Debug, Clone)]
pub struct PlacementCtxData {
  pub request: PlaceOrder,
  pub product_id: Option<ProductId>,
  pub order: Option<Order>,
  pub stage: PlacementStage,
  /// Every stage the attempt has been in, oldest first.
  pub trail: Vec<PlacementStage>,
}

impl PlacementCtxData {
  pub fn new(request: PlaceOrder) -> Self {
    Self {
      request,
      product_id: None,
      order: None,
      stage: PlacementStage::Start,
      trail: vec![PlacementStage::Start],
    }
  }

  /// Moves to `next`, recording it in the trail. An illegal transition is logged and still applied.
  pub fn advance(&mut self, next: PlacementStage) {
    if !self.stage.can_advance_to(next) {
      warn!(from = ?self.stage, to = ?next, "Unexpected placement stage transition.");
    }
    self.stage = next;
    self.trail.push(next);
  }
}
