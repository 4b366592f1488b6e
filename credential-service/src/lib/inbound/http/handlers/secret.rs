use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSubject;

/// Protected resource. Only reachable through the token middleware.
pub async fn secret(
    Extension(subject): Extension<AuthenticatedSubject>,
) -> ApiSuccess<SecretResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        SecretResponseData {
            message: "welcome to the secret".to_string(),
            subject: subject.username,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretResponseData {
    pub message: String,
    pub subject: String,
}
