// shopfront/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by the pipeline engine itself, as opposed to errors returned by handlers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Step already defined: {step_name}")]
  DuplicateStep { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

/// Errors surfaced by `ProductStore` / `OrderStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The backend rejected or failed the operation (driver error, constraint violation, ...).
  #[error("Storage backend error: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },

  /// The store refused the call outright, e.g. a closed pool or an injected fault.
  #[error("Storage unavailable: {0}")]
  Unavailable(String),
}

impl StoreError {
  pub fn backend<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    StoreError::Backend {
      source: AnyhowError::new(err),
    }
  }
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
