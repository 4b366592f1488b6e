pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use issuer::IssuedToken;
pub use issuer::TokenIssuer;
pub use issuer::DEFAULT_TOKEN_TTL_SECONDS;
pub use issuer::TOKEN_TYPE_BEARER;
pub use verifier::TokenVerifier;
