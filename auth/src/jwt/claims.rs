use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Registered JWT claims carried by access tokens.
///
/// All four claims are required; a token missing any of them does not decode.
/// Timestamps are Unix seconds (RFC 7519 NumericDate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer (identifies the issuing service instance)
    pub iss: String,

    /// Subject (username the token vouches for)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Create claims valid for `ttl` starting at `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Username the token vouches for
    /// * `issuer` - Issuing service identifier
    /// * `issued_at` - Start of the validity window
    /// * `ttl` - Length of the validity window
    pub fn for_subject(
        subject: impl ToString,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check if token is expired. The expiry instant itself is outside the window.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Check if token was issued after `current_timestamp`.
    pub fn is_not_yet_valid(&self, current_timestamp: i64) -> bool {
        current_timestamp < self.iat
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
