use std::sync::Arc;

use models::provider::{Model, ProviderId, ProviderInput};
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::provider::repository::ProviderRepository;

/// The five provider operations. Each is a single repository call; errors are
/// propagated untranslated and a missing record is `Ok(None)`.
pub struct ProviderService<R: ProviderRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProviderRepository + ?Sized> ProviderService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip_all)]
    pub async fn create_provider(&self, data: ProviderInput) -> Result<Model, ServiceError> {
        let created = self.repo.insert(data).await?;
        debug!(id = %created.id, "provider persisted");
        Ok(created)
    }

    #[instrument(skip_all)]
    pub async fn get_all_providers(&self) -> Result<Vec<Model>, ServiceError> {
        self.repo.find_all().await
    }

    /// Fails with `MalformedId` when `id` is not a structurally valid key.
    #[instrument(skip(self))]
    pub async fn get_provider_by_id(&self, id: &str) -> Result<Option<Model>, ServiceError> {
        let id = ProviderId::parse(id)?;
        self.repo.find_by_id(&id).await
    }

    #[instrument(skip(self, data))]
    pub async fn update_provider(&self, id: &str, data: ProviderInput) -> Result<Option<Model>, ServiceError> {
        let id = ProviderId::parse(id)?;
        self.repo.update_by_id(&id, data).await
    }

    /// Hard delete; returns the record as it was before removal.
    #[instrument(skip(self))]
    pub async fn delete_provider(&self, id: &str) -> Result<Option<Model>, ServiceError> {
        let id = ProviderId::parse(id)?;
        self.repo.delete_by_id(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::repository::mock::InMemoryProviderRepository;
    use models::provider::ProviderStatus;

    const ABSENT_ID: &str = "000000000000000000000000";

    fn service() -> (Arc<InMemoryProviderRepository>, ProviderService<InMemoryProviderRepository>) {
        let repo = Arc::new(InMemoryProviderRepository::new());
        (Arc::clone(&repo), ProviderService::new(repo))
    }

    fn payload(email: &str) -> ProviderInput {
        ProviderInput {
            name: Some("A".into()),
            email: Some(email.into()),
            phone: Some("1".into()),
            service_type: Some("tutoring".into()),
            status: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_equal_timestamps() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let created = svc.create_provider(payload("a@x.com")).await?;
        assert!(ProviderId::parse(&created.id).is_ok());
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.status, ProviderStatus::Active);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_fails_and_creates_nothing() -> Result<(), anyhow::Error> {
        let (repo, svc) = service();
        svc.create_provider(payload("a@x.com")).await?;
        let err = svc.create_provider(payload("a@x.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(repo.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_fail_validation() {
        let (repo, svc) = service();
        let err = svc
            .create_provider(ProviderInput { name: Some("A".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Provider validation failed: email is required, phone is required, serviceType is required"
        );
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn get_returns_created_record() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let created = svc.create_provider(payload("a@x.com")).await?;
        assert_eq!(svc.get_provider_by_id(&created.id).await?, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn get_absent_id_is_sentinel_not_error() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        assert_eq!(svc.get_provider_by_id(ABSENT_ID).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_id_is_an_error_for_every_keyed_operation() {
        let (_, svc) = service();
        let expected = ServiceError::MalformedId("nope".into());
        assert_eq!(svc.get_provider_by_id("nope").await, Err(expected.clone()));
        assert_eq!(svc.update_provider("nope", ProviderInput::default()).await, Err(expected.clone()));
        assert_eq!(svc.delete_provider("nope").await, Err(expected));
    }

    #[tokio::test]
    async fn status_update_touches_only_status_and_updated_at() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let created = svc.create_provider(payload("a@x.com")).await?;
        let updated = svc
            .update_provider(&created.id, ProviderInput { status: Some(ProviderStatus::Inactive), ..Default::default() })
            .await?
            .expect("record exists");

        assert_eq!(updated.status, ProviderStatus::Inactive);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(
            Model { status: created.status, updated_at: created.updated_at, ..updated.clone() },
            created
        );
        assert_eq!(svc.get_provider_by_id(&created.id).await?, Some(updated));
        Ok(())
    }

    #[tokio::test]
    async fn update_absent_id_is_sentinel() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let res = svc
            .update_provider(ABSENT_ID, ProviderInput { name: Some("B".into()), ..Default::default() })
            .await?;
        assert_eq!(res, None);
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let created = svc.create_provider(payload("a@x.com")).await?;

        let removed = svc.delete_provider(&created.id).await?;
        assert_eq!(removed, Some(created.clone()));
        assert_eq!(svc.get_provider_by_id(&created.id).await?, None);
        assert_eq!(svc.delete_provider(&created.id).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_empty_then_returns_everything() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        assert!(svc.get_all_providers().await?.is_empty());
        svc.create_provider(payload("a@x.com")).await?;
        svc.create_provider(payload("b@x.com")).await?;
        assert_eq!(svc.get_all_providers().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn works_through_a_trait_object() -> Result<(), anyhow::Error> {
        let repo: Arc<dyn ProviderRepository> = Arc::new(InMemoryProviderRepository::new());
        let svc = ProviderService::new(repo);
        let created = svc.create_provider(payload("dyn@x.com")).await?;
        assert!(svc.get_provider_by_id(&created.id).await?.is_some());
        Ok(())
    }
}
