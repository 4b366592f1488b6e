use async_trait::async_trait;

use auth::IssuedToken;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::Username;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated username, plaintext password and origin
    ///
    /// # Returns
    /// Stored credential record
    ///
    /// # Errors
    /// * `AlreadyExists` - Username is already taken
    /// * `Internal` - Password hashing failed
    /// * `DatabaseError` - Record could not be persisted
    async fn register(&self, command: RegisterCommand) -> Result<CredentialRecord, CredentialError>;

    /// Check credentials and issue an access token.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Issued bearer token
    ///
    /// # Errors
    /// * `NotFound` - No account with this username
    /// * `InvalidCredentials` - Password does not match
    /// * `SecretUnavailable` - Signing key could not be fetched
    /// * `DatabaseError` - Lookup failed
    /// * `Internal` - Token could not be signed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, CredentialError>;
}

/// Persistence operations for credential records.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Persist a new record.
    ///
    /// # Arguments
    /// * `record` - Record to insert
    ///
    /// # Returns
    /// Inserted record
    ///
    /// # Errors
    /// * `AlreadyExists` - Storage uniqueness constraint rejected the username
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, CredentialError>;

    /// Retrieve a record by username.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<CredentialRecord>, CredentialError>;
}
