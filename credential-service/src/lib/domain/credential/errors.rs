use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for registration and login.
///
/// Closed set of kinds; callers branch on the variant, never on message text.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    // Caller errors
    #[error("{0}")]
    InvalidInput(String),

    #[error("Username already exists: {0}")]
    AlreadyExists(String),

    #[error("User not found with username: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Signing secret unavailable: {0}")]
    SecretUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UsernameError> for CredentialError {
    fn from(err: UsernameError) -> Self {
        CredentialError::InvalidInput(err.to_string())
    }
}
