use std::fmt;
use std::net::IpAddr;

use chrono::DateTime;
use chrono::Utc;
use secrecy::SecretString;

use crate::domain::credential::errors::UsernameError;

/// Registered account.
///
/// Created once by registration and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: Username,
    /// Argon2id PHC string; never the plaintext
    pub password_hash: String,
    pub origin: Origin,
    pub created_at: DateTime<Utc>,
}

/// Username value type
///
/// Unique account identifier. Must be non-empty and fit the storage column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is the empty string
    /// * `TooLong` - Username longer than 255 bytes
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        if username.len() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: username.len(),
            });
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Informational record of where a registration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Client address as observed by the server, when known
    pub ip_addr: Option<String>,
    pub location: String,
}

impl Origin {
    const DEFAULT_LOCATION: &'static str = "Internet";

    /// Derive origin metadata from the peer address, if any.
    pub fn from_peer(peer: Option<IpAddr>) -> Self {
        Self {
            ip_addr: peer.map(|ip| ip.to_string()),
            location: Self::DEFAULT_LOCATION.to_string(),
        }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::from_peer(None)
    }
}

/// Validated registration request.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: SecretString,
    pub origin: Origin,
}

impl RegisterCommand {
    pub fn new(username: Username, password: SecretString, origin: Origin) -> Self {
        Self {
            username,
            password,
            origin,
        }
    }
}

/// Validated login request.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: SecretString,
}

impl LoginCommand {
    pub fn new(username: Username, password: SecretString) -> Self {
        Self { username, password }
    }
}
