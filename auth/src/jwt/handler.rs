use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use crate::secret::SigningKey;

/// JWT codec for encoding and decoding tokens.
///
/// Uses HS256 (HMAC with SHA-256) and accepts no other algorithm. The key is
/// passed per call because it is fetched fresh for every operation. Time-based
/// checks are left to the caller so they can run against an injected clock.
#[derive(Debug, Clone)]
pub struct JwtHandler {
    algorithm: Algorithm,
}

impl JwtHandler {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a compact JWT.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    /// * `key` - Signing key
    ///
    /// # Returns
    /// JWT token string (`header.claims.signature`, base64url)
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims, key: &SigningKey) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &EncodingKey::from_secret(key.expose()))
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a JWT and verify its signature.
    ///
    /// Does not check `iat` or `exp`.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match `key`
    /// * `Malformed` - Token structure, encoding, algorithm or claims are invalid
    pub fn decode(&self, token: &str, key: &SigningKey) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        // Presence of every claim is enforced by deserializing into `Claims`.
        validation.required_spec_claims.clear();

        let decoding_key = DecodingKey::from_secret(key.expose());
        let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => {
                    tracing::debug!(error = %e, "Token failed to decode");
                    JwtError::Malformed
                }
            }
        })?;

        Ok(token_data.claims)
    }
}

impl Default for JwtHandler {
    fn default() -> Self {
        Self::new()
    }
}
