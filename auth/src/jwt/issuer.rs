use std::sync::Arc;

use chrono::Duration;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::secret::SecretProvider;

/// Lifetime of an access token in seconds (15 minutes).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 900;

/// Token type reported alongside every issued token.
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Result of issuing a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: String,
    pub claims: Claims,
}

/// Builds signed, time-limited access tokens.
pub struct TokenIssuer {
    secrets: Arc<dyn SecretProvider>,
    clock: Arc<dyn Clock>,
    handler: JwtHandler,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the system clock and the default 15 minute TTL.
    ///
    /// # Arguments
    /// * `secrets` - Provider queried for the signing key on every issuance
    /// * `issuer` - Value of the `iss` claim
    pub fn new(secrets: Arc<dyn SecretProvider>, issuer: impl Into<String>) -> Self {
        Self {
            secrets,
            clock: Arc::new(SystemClock),
            handler: JwtHandler::new(),
            issuer: issuer.into(),
            ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a token for `subject`.
    ///
    /// # Errors
    /// * `SecretUnavailable` - The signing key could not be fetched
    /// * `EncodingFailed` - Signing failed
    pub async fn issue(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        let key = self
            .secrets
            .signing_key()
            .await
            .map_err(JwtError::SecretUnavailable)?;

        let claims = Claims::for_subject(subject, &self.issuer, self.clock.now(), self.ttl);
        let access_token = self.handler.encode(&claims, &key)?;

        tracing::debug!(subject = %subject, expires_at = claims.exp, "Token issued");

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            claims,
        })
    }
}
