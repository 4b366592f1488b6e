use thiserror::Error;

/// Error type for signing secret retrieval.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    #[error("Signing secret not found: {0}")]
    NotFound(String),

    #[error("Signing secret store unavailable: {0}")]
    Unavailable(String),

    #[error("Signing secret is empty")]
    Empty,
}
