use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extension type carrying the verified token subject to protected handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    pub username: String,
    /// Token expiry (Unix seconds)
    pub expires_at: i64,
}

/// Middleware that rejects requests without a valid bearer token.
///
/// The wrapped handler only runs once the token has been verified; every
/// failure short-circuits with 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?.to_owned();

    let claims = state
        .authenticator
        .validate_token(&token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "JWT validation failed");
            ApiError::Unauthorized(format!("error validating token: {}", e))
        })?;

    req.extensions_mut().insert(AuthenticatedSubject {
        username: claims.sub,
        expires_at: claims.exp,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("no auth token".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("corrupt token format".to_string()))?;

    auth_str
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| ApiError::Unauthorized("corrupt token format".to_string()))
}
