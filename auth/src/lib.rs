//! Credential issuance and verification library
//!
//! Provides the pieces a service needs to hand out and check bearer tokens:
//! - Password hashing (Argon2id)
//! - Signing key retrieval through a pluggable [`SecretProvider`]
//! - HS256 JWT issuance and verification against an injectable [`Clock`]
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, StaticSecretProvider};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let secrets = Arc::new(StaticSecretProvider::new("secret_key_at_least_32_bytes_long!"));
//! let auth = Authenticator::new(secrets, "auth api");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").await.unwrap();
//!
//! // Login: verify and issue token
//! let token = auth.authenticate("password123", &hash, "alice").await.unwrap();
//! assert_eq!(token.token_type, "bearer");
//!
//! // Validate token
//! let claims = auth.validate_token(&token.access_token).await.unwrap();
//! assert_eq!(claims.sub, "alice");
//! # });
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SecretError;
pub use secret::SecretProvider;
pub use secret::SigningKey;
pub use secret::StaticSecretProvider;
