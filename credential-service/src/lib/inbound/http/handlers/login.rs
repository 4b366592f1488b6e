use auth::IssuedToken;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use secrecy::SecretString;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsRequestBody;
use crate::domain::credential::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let (username, password) = body.try_into_parts()?;

    let token = state
        .credential_service
        .login(LoginCommand::new(username, SecretString::from(password)))
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub message: String,
}

impl From<IssuedToken> for LoginResponseData {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            message: "Login Successful".to_string(),
        }
    }
}
