use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::SecretString;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequestBody;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::Origin;
use crate::domain::credential::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<CredentialsRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = body?;
    let (username, password) = body.try_into_parts()?;

    // Best effort: absent when the server runs without peer address info
    let origin = Origin::from_peer(connect_info.map(|ConnectInfo(addr)| addr.ip()));

    state
        .credential_service
        .register(RegisterCommand::new(
            username,
            SecretString::from(password),
            origin,
        ))
        .await
        .map_err(ApiError::from)
        .map(|ref record| ApiSuccess::new(StatusCode::CREATED, record.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
    pub username: String,
}

impl From<&CredentialRecord> for RegisterResponseData {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            message: "user created successfully".to_string(),
            username: record.username.as_str().to_string(),
        }
    }
}
