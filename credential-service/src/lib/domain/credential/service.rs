use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::IssuedToken;
use auth::JwtError;
use chrono::Utc;
use secrecy::ExposeSecret;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::ports::CredentialRepository;
use crate::domain::credential::ports::CredentialServicePort;

const MISSING_FIELDS: &str = "username and password required";

/// Domain service implementing the registration and login flows.
///
/// Steps within one call run strictly in order: existence check, then
/// password work, then persistence or token issuance.
pub struct CredentialService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
}

impl<CR> CredentialService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<CR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<CR> CredentialServicePort for CredentialService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<CredentialRecord, CredentialError> {
        if command.password.expose_secret().is_empty() {
            return Err(CredentialError::InvalidInput(MISSING_FIELDS.to_string()));
        }

        // A failed lookup is not fatal: the insert below is still guarded by
        // the storage uniqueness constraint.
        match self.repository.find_by_username(&command.username).await {
            Ok(Some(_)) => {
                return Err(CredentialError::AlreadyExists(
                    command.username.as_str().to_string(),
                ))
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    username = %command.username,
                    error = %e,
                    "Existence check failed, proceeding with insert"
                );
            }
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose_secret())
            .await
            .map_err(|e| CredentialError::Internal(format!("Password hashing failed: {}", e)))?;

        let record = CredentialRecord {
            username: command.username,
            password_hash,
            origin: command.origin,
            created_at: Utc::now(),
        };

        let created = self.repository.insert(record).await?;

        tracing::info!(
            username = %created.username,
            ip_addr = ?created.origin.ip_addr,
            "User registered"
        );

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, CredentialError> {
        let record = self
            .repository
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| CredentialError::NotFound(command.username.as_str().to_string()))?;

        let token = self
            .authenticator
            .authenticate(
                command.password.expose_secret(),
                &record.password_hash,
                record.username.as_str(),
            )
            .await
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => CredentialError::InvalidCredentials,
                AuthenticationError::JwtError(JwtError::SecretUnavailable(err)) => {
                    CredentialError::SecretUnavailable(err.to_string())
                }
                AuthenticationError::JwtError(err) => {
                    CredentialError::Internal(format!("Token issuance failed: {}", err))
                }
            })?;

        tracing::info!(username = %record.username, "User logged in");

        Ok(token)
    }
}
