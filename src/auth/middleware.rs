//! Authentication Middleware
//! Mission: Protect API endpoints with bearer token validation

use crate::auth::{jwt::JwtHandler, models::Claims};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Auth middleware that validates JWT bearer tokens
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, BearerError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(BearerError::MissingToken)?
        .to_str()
        .map_err(|_| BearerError::InvalidFormat)?;

    let token = bearer_token(header).ok_or(BearerError::InvalidFormat)?;

    // Validate token and extract claims
    let claims = jwt_handler.validate_token(token).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        BearerError::InvalidToken
    })?;

    // Add claims to request extensions so handlers can access them
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Token part of an `Authorization: Bearer <token>` header
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Extract claims from request (use after auth middleware)
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}

/// Bearer guard rejections
#[derive(Debug)]
pub enum BearerError {
    MissingToken,
    InvalidFormat,
    InvalidToken,
}

impl IntoResponse for BearerError {
    fn into_response(self) -> Response {
        let message = match self {
            BearerError::MissingToken => "Missing authorization token",
            BearerError::InvalidFormat => "Invalid authorization format. Use: Bearer {token}",
            BearerError::InvalidToken => "Invalid or expired token",
        };

        let status = StatusCode::UNAUTHORIZED;
        let body = json!({
            "statusCode": status.as_u16(),
            "error": "Unauthorized",
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
