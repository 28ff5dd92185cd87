// shopfront_server/src/auth.rs

//! Optional bearer-token guard for the storefront routes.
//!
//! When `JWT_SECRET` is configured, product and order routes require an HS256 token whose
//! `sub` names the caller. The token is read from `Authorization: Bearer <token>` or, as
//! a fallback for plain links, from a `token` query parameter. A missing token is 401;
//! a token that fails verification (bad signature, expired, malformed) is 403.
//! Without a secret every request passes as an anonymous caller.

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  /// Caller id.
  pub sub: String,
  /// Expiry, seconds since the Unix epoch.
  pub exp: i64,
  pub iat: i64,
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
  let key = DecodingKey::from_secret(secret.as_bytes());
  let validation = Validation::new(Algorithm::HS256);
  decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

#[derive(Deserialize)]
struct TokenQuery {
  token: Option<String>,
}

fn request_token(req: &HttpRequest) -> Option<String> {
  let from_header = req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .map(str::to_string);

  from_header.or_else(|| {
    web::Query::<TokenQuery>::from_query(req.query_string())
      .ok()
      .and_then(|query| query.into_inner().token)
      .filter(|token| !token.is_empty())
  })
}

/// The caller of a guarded route. `user_id` is `None` when no secret is configured.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  pub user_id: Option<String>,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(authenticate(req))
  }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let state = req
    .app_data::<web::Data<AppState>>()
    .ok_or_else(|| AppError::Internal("Application state is not registered.".to_string()))?;

  let Some(secret) = state.config.jwt_secret.as_deref() else {
    return Ok(AuthenticatedUser { user_id: None });
  };

  let Some(token) = request_token(req) else {
    warn!(path = %req.path(), "Rejecting request without a token.");
    return Err(AppError::Unauthorized("Access denied. No token provided.".to_string()));
  };

  match verify_token(&token, secret) {
    Ok(claims) => {
      debug!(user_id = %claims.sub, issued_at = claims.iat, expires_at = claims.exp, "Token accepted.");
      Ok(AuthenticatedUser {
        user_id: Some(claims.sub),
      })
    }
    Err(e) => {
      warn!(path = %req.path(), error = %e, "Rejecting request with an invalid token.");
      Err(AppError::Forbidden("Your token is invalid or has expired.".to_string()))
    }
  }
}
