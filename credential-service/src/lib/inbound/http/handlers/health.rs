use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn health() -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            message: "alive and well".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub message: String,
}
