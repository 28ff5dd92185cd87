// shopfront_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use shopfront::ProductId;
use tracing::{info, instrument, warn};

use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state, caller), fields(user_id = ?caller.user_id))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let products = app_state.products.list().await?;
  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(
  name = "handler::get_product",
  skip(app_state, caller, path),
  fields(product_id = %path.as_str(), user_id = ?caller.user_id)
)]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  caller: AuthenticatedUser,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let raw_id = path.into_inner();

  // An id that cannot parse names no product.
  let product_id: ProductId = match raw_id.parse() {
    Ok(id) => id,
    Err(e) => {
      warn!(error = %e, "Rejecting unparseable product id.");
      return Err(AppError::NotFound(format!("Product with ID {} not found.", raw_id)));
    }
  };

  match app_state.products.get(product_id).await? {
    Some(product) => {
      info!("Product {} fetched successfully.", product_id);
      Ok(HttpResponse::Ok().json(json!({
          "message": "Product fetched successfully.",
          "product": product
      })))
    }
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)))
    }
  }
}
