use async_trait::async_trait;
use auth::SecretError;
use auth::SecretProvider;
use auth::SigningKey;
use sqlx::PgPool;
use sqlx::Row;

/// Reads the signing key from the `secrets` table on every call.
pub struct PostgresSecretProvider {
    pool: PgPool,
    project_name: String,
}

impl PostgresSecretProvider {
    /// # Arguments
    /// * `pool` - Database pool
    /// * `project_name` - Row key in the `secrets` table
    pub fn new(pool: PgPool, project_name: impl Into<String>) -> Self {
        Self {
            pool,
            project_name: project_name.into(),
        }
    }
}

#[async_trait]
impl SecretProvider for PostgresSecretProvider {
    async fn signing_key(&self) -> Result<SigningKey, SecretError> {
        let row = sqlx::query(
            r#"
            SELECT secret_key
            FROM secrets
            WHERE project_name = $1
            "#,
        )
        .bind(&self.project_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| SecretError::Unavailable(e.to_string()))?
        .ok_or_else(|| SecretError::NotFound(self.project_name.clone()))?;

        let secret_key: String = row
            .try_get("secret_key")
            .map_err(|e| SecretError::Unavailable(e.to_string()))?;

        SigningKey::new(secret_key.into_bytes())
    }
}
