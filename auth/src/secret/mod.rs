pub mod errors;
pub mod provider;

pub use errors::SecretError;
pub use provider::SecretProvider;
pub use provider::SigningKey;
pub use provider::StaticSecretProvider;
