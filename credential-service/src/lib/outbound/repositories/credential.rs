use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::Origin;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::CredentialRepository;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A stored username that fails validation is a storage fault, not caller input.
fn stored_username(raw: String) -> Result<Username, CredentialError> {
    Username::new(raw)
        .map_err(|e| CredentialError::DatabaseError(format!("Corrupt username column: {}", e)))
}

fn record_from_row(row: &PgRow) -> Result<CredentialRecord, CredentialError> {
    let column = |e: sqlx::Error| CredentialError::DatabaseError(e.to_string());

    let username: String = row.try_get("username").map_err(column)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column)?;

    Ok(CredentialRecord {
        username: stored_username(username)?,
        password_hash: row.try_get("password_hash").map_err(column)?,
        origin: Origin {
            ip_addr: row.try_get("ip_addr").map_err(column)?,
            location: row.try_get("location").map_err(column)?,
        },
        created_at,
    })
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, CredentialError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, ip_addr, location, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.username.as_str())
        .bind(&record.password_hash)
        .bind(record.origin.ip_addr.as_deref())
        .bind(&record.origin.location)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return CredentialError::AlreadyExists(record.username.as_str().to_string());
                }
            }
            CredentialError::DatabaseError(e.to_string())
        })?;

        Ok(record)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<CredentialRecord>, CredentialError> {
        let row = sqlx::query(
            r#"
            SELECT username, password_hash, ip_addr, location, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        row.as_ref().map(record_from_row).transpose()
    }
}
