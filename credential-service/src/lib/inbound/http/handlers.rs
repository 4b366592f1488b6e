use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::errors::UsernameError;
use crate::domain::credential::models::Username;

pub mod health;
pub mod login;
pub mod register;
pub mod secret;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CredentialError::AlreadyExists(_) => {
                ApiError::Conflict("username taken. pick another".to_string())
            }
            CredentialError::NotFound(_) => {
                ApiError::BadRequest("username not found. register first".to_string())
            }
            CredentialError::InvalidCredentials => {
                ApiError::BadRequest("password is incorrect".to_string())
            }
            CredentialError::SecretUnavailable(_)
            | CredentialError::DatabaseError(_)
            | CredentialError::Internal(_) => {
                // Detail stays in the logs
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("invalid json".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Raw `{username, password}` body shared by register and login.
///
/// Missing fields decode as empty strings and are reported by validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCredentialsRequestError {
    #[error("username and password required")]
    MissingFields,

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),
}

impl CredentialsRequestBody {
    fn try_into_parts(self) -> Result<(Username, String), ParseCredentialsRequestError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ParseCredentialsRequestError::MissingFields);
        }
        let username = Username::new(self.username)?;
        Ok((username, self.password))
    }
}

impl From<ParseCredentialsRequestError> for ApiError {
    fn from(err: ParseCredentialsRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
