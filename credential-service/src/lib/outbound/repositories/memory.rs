use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::CredentialRepository;

/// In-process credential store for tests and the `memory` storage mode.
///
/// Nothing survives a restart. Inserts enforce username uniqueness the same
/// way the Postgres primary key does.
#[derive(Default)]
pub struct MemoryCredentialRepository {
    records: RwLock<HashMap<Username, CredentialRecord>>,
}

impl MemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, CredentialError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.username) {
            return Err(CredentialError::AlreadyExists(
                record.username.as_str().to_string(),
            ));
        }

        records.insert(record.username.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<CredentialRecord>, CredentialError> {
        Ok(self.records.read().await.get(username).cloned())
    }
}
