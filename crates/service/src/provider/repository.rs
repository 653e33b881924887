use async_trait::async_trait;
use models::provider::{self, Model, ProviderId, ProviderInput};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QuerySelect, TransactionTrait};

use crate::errors::ServiceError;

/// Persistence operations behind the provider service. Each call touches at most one record.
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn insert(&self, input: ProviderInput) -> Result<Model, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Model>, ServiceError>;
    async fn find_by_id(&self, id: &ProviderId) -> Result<Option<Model>, ServiceError>;
    async fn update_by_id(&self, id: &ProviderId, patch: ProviderInput) -> Result<Option<Model>, ServiceError>;
    async fn delete_by_id(&self, id: &ProviderId) -> Result<Option<Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProviderRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProviderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProviderRepository for SeaOrmProviderRepository {
    async fn insert(&self, input: ProviderInput) -> Result<Model, ServiceError> {
        Ok(provider::create(&self.db, input).await?)
    }

    async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(provider::Entity::find().all(&self.db).await?)
    }

    async fn find_by_id(&self, id: &ProviderId) -> Result<Option<Model>, ServiceError> {
        Ok(provider::find(&self.db, id).await?)
    }

    async fn update_by_id(&self, id: &ProviderId, patch: ProviderInput) -> Result<Option<Model>, ServiceError> {
        // Dropping `txn` on an early return rolls it back.
        let txn = self.db.begin().await?;
        let Some(mut record) = provider::Entity::find_by_id(id.as_str().to_owned())
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };
        provider::apply_patch(&mut record, patch)?;
        let updated = record.into_update().update(&txn).await?;
        txn.commit().await?;
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &ProviderId) -> Result<Option<Model>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(record) = provider::Entity::find_by_id(id.as_str().to_owned())
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };
        record.clone().delete(&txn).await?;
        txn.commit().await?;
        Ok(Some(record))
    }
}

/// In-memory repositories for tests and for running the HTTP layer without a database.
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Keeps records in insertion order and enforces the unique email index.
    #[derive(Default)]
    pub struct InMemoryProviderRepository {
        records: Mutex<Vec<Model>>,
    }

    impl InMemoryProviderRepository {
        pub fn new() -> Self {
            Self::default()
        }

        fn records(&self) -> MutexGuard<'_, Vec<Model>> {
            self.records.lock().unwrap_or_else(PoisonError::into_inner)
        }

        pub fn len(&self) -> usize {
            self.records().len()
        }

        pub fn is_empty(&self) -> bool {
            self.records().is_empty()
        }
    }

    fn email_taken(records: &[Model], email: &str, except_id: Option<&str>) -> bool {
        records
            .iter()
            .any(|r| r.email == email && Some(r.id.as_str()) != except_id)
    }

    #[async_trait]
    impl ProviderRepository for InMemoryProviderRepository {
        async fn insert(&self, input: ProviderInput) -> Result<Model, ServiceError> {
            let record = provider::build(input)?;
            let mut records = self.records();
            if email_taken(&records, &record.email, None) {
                return Err(ServiceError::Validation(provider::DUPLICATE_EMAIL.into()));
            }
            records.push(record.clone());
            Ok(record)
        }

        async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
            Ok(self.records().clone())
        }

        async fn find_by_id(&self, id: &ProviderId) -> Result<Option<Model>, ServiceError> {
            Ok(self.records().iter().find(|r| r.id == id.as_str()).cloned())
        }

        async fn update_by_id(&self, id: &ProviderId, patch: ProviderInput) -> Result<Option<Model>, ServiceError> {
            let mut records = self.records();
            let Some(pos) = records.iter().position(|r| r.id == id.as_str()) else {
                return Ok(None);
            };
            let mut updated = records[pos].clone();
            provider::apply_patch(&mut updated, patch)?;
            if email_taken(&records, &updated.email, Some(id.as_str())) {
                return Err(ServiceError::Validation(provider::DUPLICATE_EMAIL.into()));
            }
            records[pos] = updated.clone();
            Ok(Some(updated))
        }

        async fn delete_by_id(&self, id: &ProviderId) -> Result<Option<Model>, ServiceError> {
            let mut records = self.records();
            let pos = records.iter().position(|r| r.id == id.as_str());
            Ok(pos.map(|pos| records.remove(pos)))
        }
    }

    /// Every call fails with the given store error, as an unreachable database would.
    pub struct UnavailableProviderRepository {
        pub message: String,
    }

    impl UnavailableProviderRepository {
        pub fn new(message: impl Into<String>) -> Self {
            Self { message: message.into() }
        }

        fn fail<T>(&self) -> Result<T, ServiceError> {
            Err(ServiceError::Db(self.message.clone()))
        }
    }

    #[async_trait]
    impl ProviderRepository for UnavailableProviderRepository {
        async fn insert(&self, _input: ProviderInput) -> Result<Model, ServiceError> {
            self.fail()
        }

        async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
            self.fail()
        }

        async fn find_by_id(&self, _id: &ProviderId) -> Result<Option<Model>, ServiceError> {
            self.fail()
        }

        async fn update_by_id(&self, _id: &ProviderId, _patch: ProviderInput) -> Result<Option<Model>, ServiceError> {
            self.fail()
        }

        async fn delete_by_id(&self, _id: &ProviderId) -> Result<Option<Model>, ServiceError> {
            self.fail()
        }
    }
}
