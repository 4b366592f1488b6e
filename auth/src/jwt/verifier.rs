use std::sync::Arc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::secret::SecretProvider;

/// Validates access tokens against the current signing key.
///
/// Verification is read-only: a valid token is never refreshed or extended.
pub struct TokenVerifier {
    secrets: Arc<dyn SecretProvider>,
    clock: Arc<dyn Clock>,
    handler: JwtHandler,
}

impl TokenVerifier {
    pub fn new(secrets: Arc<dyn SecretProvider>) -> Self {
        Self {
            secrets,
            clock: Arc::new(SystemClock),
            handler: JwtHandler::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Verify signature, structure and validity window of `token`.
    ///
    /// # Returns
    /// The token's claims; `sub` identifies the authenticated user
    ///
    /// # Errors
    /// * `SecretUnavailable` - The signing key could not be fetched
    /// * `Malformed` - Token is not a well-formed HS256 JWT with all claims
    /// * `InvalidSignature` - Signature does not match the current key
    /// * `Expired` - Current time is at or after `exp`
    /// * `NotYetValid` - Current time is before `iat`
    pub async fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let key = self
            .secrets
            .signing_key()
            .await
            .map_err(JwtError::SecretUnavailable)?;

        let claims = self.handler.decode(token, &key)?;

        let now = self.clock.now().timestamp();
        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }
        if claims.is_not_yet_valid(now) {
            return Err(JwtError::NotYetValid);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::DateTime;
    use chrono::Duration;
    use proptest::prelude::*;

    use super::*;
    use crate::clock::ManualClock;
    use crate::jwt::issuer::TokenIssuer;
    use crate::secret::SecretError;
    use crate::secret::SigningKey;
    use crate::secret::StaticSecretProvider;

    const BASE64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

    /// Provider whose key can be swapped between calls.
    struct RotatingSecretProvider {
        current: Mutex<Vec<u8>>,
    }

    impl RotatingSecretProvider {
        fn new(secret: &[u8]) -> Self {
            Self {
                current: Mutex::new(secret.to_vec()),
            }
        }

        fn rotate(&self, secret: &[u8]) {
            *self.current.lock().unwrap() = secret.to_vec();
        }
    }

    #[async_trait]
    impl SecretProvider for RotatingSecretProvider {
        async fn signing_key(&self) -> Result<SigningKey, SecretError> {
            SigningKey::new(self.current.lock().unwrap().clone())
        }
    }

    struct FailingSecretProvider;

    #[async_trait]
    impl SecretProvider for FailingSecretProvider {
        async fn signing_key(&self) -> Result<SigningKey, SecretError> {
            Err(SecretError::Unavailable("connection refused".to_string()))
        }
    }

    fn start() -> DateTime<chrono::Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn issuer_and_verifier(clock: Arc<ManualClock>) -> (TokenIssuer, TokenVerifier) {
        let secrets: Arc<dyn SecretProvider> =
            Arc::new(StaticSecretProvider::new("test_secret_key_at_least_32_bytes!"));
        (
            TokenIssuer::new(Arc::clone(&secrets), "test").with_clock(clock.clone()),
            TokenVerifier::new(secrets).with_clock(clock),
        )
    }

    /// Replace the character at `index` with a different base64url character.
    fn tamper(token: &str, index: usize, replacement: u8) -> String {
        let mut bytes = token.as_bytes().to_vec();
        let original = bytes[index];
        bytes[index] = if replacement == original {
            BASE64URL[(BASE64URL.iter().position(|&c| c == original).unwrap_or(0) + 1) % 64]
        } else {
            replacement
        };
        String::from_utf8(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_verify_fresh_token() {
        let clock = Arc::new(ManualClock::new(start()));
        let (issuer, verifier) = issuer_and_verifier(clock);

        let issued = issuer.issue("alice").await.unwrap();
        let claims = verifier.verify(&issued.access_token).await.unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims, issued.claims);
    }

    #[tokio::test]
    async fn test_verify_expires_after_ttl() {
        let clock = Arc::new(ManualClock::new(start()));
        let (issuer, verifier) = issuer_and_verifier(clock.clone());

        let issued = issuer.issue("alice").await.unwrap();

        clock.advance(Duration::seconds(899));
        assert!(verifier.verify(&issued.access_token).await.is_ok());

        clock.advance(Duration::seconds(1));
        assert!(matches!(
            verifier.verify(&issued.access_token).await,
            Err(JwtError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_verify_does_not_extend_expiry() {
        let clock = Arc::new(ManualClock::new(start()));
        let (issuer, verifier) = issuer_and_verifier(clock.clone());

        let issued = issuer.issue("alice").await.unwrap();

        clock.advance(Duration::minutes(10));
        let claims = verifier.verify(&issued.access_token).await.unwrap();
        assert_eq!(claims.exp, issued.claims.exp);

        clock.advance(Duration::minutes(10));
        assert!(matches!(
            verifier.verify(&issued.access_token).await,
            Err(JwtError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_verify_token_from_the_future() {
        let issuing_clock = Arc::new(ManualClock::new(start() + Duration::hours(1)));
        let verifying_clock = Arc::new(ManualClock::new(start()));
        let (issuer, _) = issuer_and_verifier(issuing_clock);
        let (_, verifier) = issuer_and_verifier(verifying_clock);

        let issued = issuer.issue("alice").await.unwrap();
        assert!(matches!(
            verifier.verify(&issued.access_token).await,
            Err(JwtError::NotYetValid)
        ));
    }

    #[tokio::test]
    async fn test_verify_after_rotation_fails() {
        let secrets = Arc::new(RotatingSecretProvider::new(b"first_secret"));
        let issuer = TokenIssuer::new(secrets.clone(), "test");
        let verifier = TokenVerifier::new(secrets.clone());

        let issued = issuer.issue("alice").await.unwrap();
        assert!(verifier.verify(&issued.access_token).await.is_ok());

        secrets.rotate(b"second_secret");
        assert!(matches!(
            verifier.verify(&issued.access_token).await,
            Err(JwtError::InvalidSignature)
        ));
    }

    #[tokio::test]
    async fn test_verify_secret_unavailable() {
        let verifier = TokenVerifier::new(Arc::new(FailingSecretProvider));

        let result = verifier.verify("anything").await;
        assert!(matches!(result, Err(JwtError::SecretUnavailable(_))));
        // Detail of the store failure stays out of the display string
        assert!(!result.unwrap_err().to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_verify_garbage() {
        let clock = Arc::new(ManualClock::new(start()));
        let (_, verifier) = issuer_and_verifier(clock);

        for token in ["", "garbage", "not-a-token", "a.b.c", "a.b"] {
            assert!(matches!(
                verifier.verify(token).await,
                Err(JwtError::Malformed)
            ));
        }
    }

    #[tokio::test]
    async fn test_verify_alg_none() {
        let clock = Arc::new(ManualClock::new(start()));
        let (issuer, verifier) = issuer_and_verifier(clock);

        let issued = issuer.issue("alice").await.unwrap();
        let claims_part = issued.access_token.split('.').nth(1).unwrap();
        // {"alg":"none","typ":"JWT"}
        let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", claims_part);

        assert!(verifier.verify(&forged).await.is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn tampered_token_never_verifies(position in any::<prop::sample::Index>(), replacement in 0usize..64) {
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let clock = Arc::new(ManualClock::new(start()));
            let (issuer, verifier) = issuer_and_verifier(clock);

            let issued = runtime.block_on(issuer.issue("alice")).unwrap();
            let token = issued.access_token;

            // Tamper within the claims or signature segment
            let header_end = token.find('.').unwrap() + 1;
            let candidates: Vec<usize> = (header_end..token.len())
                .filter(|&i| token.as_bytes()[i] != b'.')
                .collect();
            let index = candidates[position.index(candidates.len())];
            let tampered = tamper(&token, index, BASE64URL[replacement]);

            let result = runtime.block_on(verifier.verify(&tampered));
            prop_assert!(
                matches!(result, Err(JwtError::InvalidSignature) | Err(JwtError::Malformed)),
                "tampered token produced {:?}",
                result
            );
        }
    }
}
