// shopfront_server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use shopfront::{PipelineError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  // Unknown product, unparseable id and exhausted stock all land here.
  #[error("Out of stock")]
  OutOfStock,

  #[error("Failed to create order")]
  OrderFailed,

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Storage Error: {0}")]
  Store(#[from] StoreError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<PipelineError> for AppError {
  fn from(err: PipelineError) -> Self {
    AppError::Internal(format!("Order flow setup failed: {}", err))
  }
}

// Bootstrap code works in anyhow; recover the concrete error where one was wrapped.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    let err = match err.downcast::<AppError>() {
      Ok(app_err) => return app_err,
      Err(other) => other,
    };
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      AppError::Forbidden(_) => StatusCode::FORBIDDEN,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::OutOfStock => StatusCode::CONFLICT,
      AppError::OrderFailed
      | AppError::Config(_)
      | AppError::Sqlx(_)
      | AppError::Store(_)
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Unauthorized(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::Forbidden(m) => HttpResponse::Forbidden().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::OutOfStock => HttpResponse::Conflict().json(json!({"error": "Out of stock"})),
      AppError::OrderFailed => HttpResponse::InternalServerError().json(json!({"error": "Failed to create order"})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"})),
      AppError::Store(_) => HttpResponse::InternalServerError().json(json!({"error": "Storage operation failed"})),
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_codes_follow_the_error_kind() {
    assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
    assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::OutOfStock.status_code(), StatusCode::CONFLICT);
    assert_eq!(AppError::OrderFailed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      AppError::Store(StoreError::Unavailable("down".into())).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn anyhow_wrapping_an_app_error_is_unwrapped() {
    let wrapped = anyhow::Error::new(AppError::Config("bad".into()));
    assert!(matches!(AppError::from(wrapped), AppError::Config(ref m) if m == "bad"));
  }

  #[test]
  fn anyhow_wrapping_sqlx_error_becomes_sqlx_variant() {
    let wrapped = anyhow::Error::new(sqlx::Error::RowNotFound);
    assert!(matches!(AppError::from(wrapped), AppError::Sqlx(sqlx::Error::RowNotFound)));
  }

  #[test]
  fn context_wrapped_sqlx_error_is_recovered() {
    use anyhow::Context;
    let wrapped = Err::<(), _>(sqlx::Error::PoolTimedOut)
      .context("Failed to connect to the database after 5 attempts")
      .unwrap_err();
    assert!(matches!(AppError::from(wrapped), AppError::Sqlx(sqlx::Error::PoolTimedOut)));
  }

  #[test]
  fn pipeline_setup_errors_are_internal() {
    let err = AppError::from(PipelineError::StepNotFound {
      step_name: "reserve_stock".to_string(),
    });
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn other_anyhow_errors_are_internal() {
    let err = AppError::from(anyhow::anyhow!("boom"));
    assert!(matches!(err, AppError::Internal(ref m) if m == "boom"));
  }
}
