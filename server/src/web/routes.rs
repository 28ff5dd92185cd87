// shopfront_server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{order_handlers, product_handlers};

// Liveness only; storage reachability is checked at startup.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` and from handler tests to mount every route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    .route("/products", web::get().to(product_handlers::list_products_handler))
    .route(
      "/product/{product_id}",
      web::get().to(product_handlers::get_product_handler),
    )
    // Tail match: an empty or multi-segment id still reaches the flow and is rejected there.
    .route(
      "/product/order/{product_id:.*}",
      web::post().to(order_handlers::place_order_handler),
    )
    .route(
      order_handlers::ORDER_SUCCESS_PATH,
      web::get().to(order_handlers::order_success_handler),
    );
}
