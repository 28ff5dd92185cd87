// shopfront/src/placement/outcome.rs

use crate::error::{PipelineError, StoreError};
use crate::model::Order;
use thiserror::Error;

use super::context::PlacementStage;

#[derive(Debug, Error)]
pub enum PlacementError {
  #[error("Storage error: {0}")]
  Store(#[from] StoreError),

  #[error("Pipeline error: {0}")]
  Pipeline(#[from] PipelineError),
}

/// What one order placement attempt did.
#[derive(Debug)]
pub enum PlacementOutcome {
  /// Stock was reserved and the order recorded.
  Placed(Order),
  /// Nothing matched: unparseable id, unknown product, or no stock left. Nothing changed.
  Rejected,
  /// Recording failed after a reservation; the reservation was released.
  Compensated { cause: PlacementError },
  /// Recording failed and the reservation could not be released.
  /// Stock stays decremented with no order pointing at it.
  Uncompensated {
    cause: PlacementError,
    compensation_errors: Vec<PlacementError>,
  },
}

impl PlacementOutcome {
  pub fn is_placed(&self) -> bool {
    matches!(self, PlacementOutcome::Placed(_))
  }

  pub fn is_rejected(&self) -> bool {
    matches!(self, PlacementOutcome::Rejected)
  }

  pub fn order(&self) -> Option<&Order> {
    match self {
      PlacementOutcome::Placed(order) => Some(order),
      _ => None,
    }
  }
}

/// A placement outcome together with the state the attempt finished in.
#[derive(Debug)]
pub struct PlacementAttempt {
  pub outcome: PlacementOutcome,
  pub stage: PlacementStage,
  /// Stages visited, from `Start` to `stage`.
  pub trail: Vec<PlacementStage>,
}
