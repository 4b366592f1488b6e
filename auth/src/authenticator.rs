use std::sync::Arc;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::SecretProvider;

/// Authentication coordinator combining password hashing and token handling.
///
/// Password work is CPU-bound and runs on the blocking thread pool. If the
/// calling task is dropped mid-flight the result is discarded; nothing is
/// written by these operations.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_verifier: TokenVerifier,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with default hashing cost, system clock and
    /// the default token lifetime.
    ///
    /// # Arguments
    /// * `secrets` - Signing key source shared by issuance and verification
    /// * `issuer` - Value of the `iss` claim in issued tokens
    pub fn new(secrets: Arc<dyn SecretProvider>, issuer: impl Into<String>) -> Self {
        Self::from_parts(
            PasswordHasher::new(),
            TokenIssuer::new(Arc::clone(&secrets), issuer),
            TokenVerifier::new(secrets),
        )
    }

    /// Assemble an authenticator from individually configured components.
    pub fn from_parts(
        password_hasher: PasswordHasher,
        token_issuer: TokenIssuer,
        token_verifier: TokenVerifier,
    ) -> Self {
        Self {
            password_hasher,
            token_issuer,
            token_verifier,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing failed or the hashing task was aborted
    pub async fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(format!("hashing task failed: {}", e)))?
    }

    /// Check a password against a stored hash.
    ///
    /// Any failure, including a malformed hash or an aborted task, is a mismatch.
    pub async fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Password verification task failed");
                false
            })
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Username the token will vouch for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token issuance failed
    pub async fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.verify_password(password, stored_hash).await {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_issuer.issue(subject).await?)
    }

    /// Issue a token without password verification.
    pub async fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue(subject).await
    }

    /// Validate a token and return its claims.
    pub async fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_verifier.verify(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::StaticSecretProvider;

    fn authenticator() -> Authenticator {
        let secrets: Arc<dyn SecretProvider> =
            Arc::new(StaticSecretProvider::new("test_secret_key_at_least_32_bytes!"));
        Authenticator::from_parts(
            PasswordHasher::with_params(8, 1, 1).unwrap(),
            TokenIssuer::new(Arc::clone(&secrets), "test"),
            TokenVerifier::new(secrets),
        )
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .await
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, "alice")
            .await
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.token_type, "bearer");

        let decoded = authenticator
            .validate_token(&result.access_token)
            .await
            .expect("Token validation failed");
        assert_eq!(decoded.sub, "alice");
        assert_eq!(decoded.iss, "test");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .await
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("wrong_password", &hash, "alice")
            .await;
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_malformed_hash() {
        let authenticator = authenticator();

        let result = authenticator
            .authenticate("my_password", "not-a-phc-string", "alice")
            .await;
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_issue_and_validate_token() {
        let authenticator = authenticator();

        let token = authenticator
            .issue_token("alice")
            .await
            .expect("Failed to issue token");

        let decoded = authenticator
            .validate_token(&token.access_token)
            .await
            .expect("Failed to validate token");
        assert_eq!(decoded, token.claims);
    }

    #[tokio::test]
    async fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here").await;
        assert!(matches!(result, Err(JwtError::Malformed)));
    }
}
