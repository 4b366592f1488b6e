use std::fmt;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use secrecy::SecretSlice;

use super::errors::SecretError;

/// Symmetric key used to sign and verify tokens.
///
/// The bytes are redacted from `Debug` output and zeroized on drop.
pub struct SigningKey(SecretSlice<u8>);

impl SigningKey {
    /// Wrap raw key material.
    ///
    /// # Errors
    /// * `Empty` - The key has no bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        Ok(Self(SecretSlice::from(bytes)))
    }

    /// Borrow the key material for a signing operation.
    pub fn expose(&self) -> &[u8] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

/// Source of the current signing key.
///
/// Token operations fetch the key on every call instead of caching it, so a
/// rotated key takes effect immediately. Tokens signed with a previous key then
/// fail verification with an invalid-signature error.
#[async_trait]
pub trait SecretProvider: Send + Sync + 'static {
    /// Fetch the current signing key.
    ///
    /// # Errors
    /// * `NotFound` - No key is configured
    /// * `Unavailable` - The backing store could not be reached
    /// * `Empty` - The stored key has no bytes
    async fn signing_key(&self) -> Result<SigningKey, SecretError>;
}

/// Provider returning a fixed key, e.g. one loaded from configuration.
pub struct StaticSecretProvider {
    secret: SecretSlice<u8>,
}

impl StaticSecretProvider {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: SecretSlice::from(secret.into()),
        }
    }
}

#[async_trait]
impl SecretProvider for StaticSecretProvider {
    async fn signing_key(&self) -> Result<SigningKey, SecretError> {
        SigningKey::new(self.secret.expose_secret().to_vec())
    }
}
