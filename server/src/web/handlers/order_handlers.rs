// shopfront_server/src/web/handlers/order_handlers.rs

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use shopfront::{PlaceOrder, PlacementOutcome};
use tracing::{info, instrument, warn};

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::state::AppState;

pub const ORDER_SUCCESS_PATH: &str = "/order-success";

#[derive(Deserialize, Debug)]
pub struct PlaceOrderForm {
  pub email: Option<String>,
  pub location: Option<String>,
}

impl PlaceOrderForm {
  /// Builds the flow request, rejecting a missing or blank email.
  fn into_request(self, product_id: String) -> Result<PlaceOrder, AppError> {
    let email = self
      .email
      .map(|e| e.trim().to_string())
      .filter(|e| !e.is_empty())
      .ok_or_else(|| AppError::Validation("Email is required.".to_string()))?;

    let request = PlaceOrder::new(product_id, email);
    Ok(match self.location.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()) {
      Some(location) => request.with_location(location),
      None => request,
    })
  }
}

#[instrument(
  name = "handler::place_order",
  skip(app_state, caller, path, form),
  fields(product_id = %path.as_str(), user_id = ?caller.user_id)
)]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  caller: AuthenticatedUser,
  path: web::Path<String>,
  form: web::Form<PlaceOrderForm>,
) -> Result<HttpResponse, AppError> {
  let request = form.into_inner().into_request(path.into_inner())?;

  match app_state.placement.place(request).await {
    PlacementOutcome::Placed(order) => {
      info!(order_id = %order.id, "Order placed; redirecting to confirmation.");
      Ok(
        HttpResponse::SeeOther()
          .insert_header((header::LOCATION, ORDER_SUCCESS_PATH))
          .json(json!({
              "message": "Order placed successfully.",
              "order_id": order.id
          })),
      )
    }
    PlacementOutcome::Rejected => Err(AppError::OutOfStock),
    PlacementOutcome::Compensated { cause } => {
      warn!(error = %cause, "Order recording failed; reservation was released.");
      Err(AppError::OrderFailed)
    }
    // The flow has already logged this at error level with the product id.
    PlacementOutcome::Uncompensated { .. } => Err(AppError::OrderFailed),
  }
}

pub async fn order_success_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "message": "Your order has been placed." }))
}
