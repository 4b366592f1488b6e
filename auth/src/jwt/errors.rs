use thiserror::Error;

use crate::secret::SecretError;

/// Error type for JWT operations.
///
/// Display strings never include key material or decoder internals, so they
/// are safe to return to clients.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("failed to encode token")]
    EncodingFailed(String),

    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    #[error("token is not yet valid")]
    NotYetValid,

    #[error("signing secret unavailable")]
    SecretUnavailable(#[source] SecretError),
}
