//! Salon catalog service - salons and the services they offer.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Salon, Service};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{SalonRepository, ServiceRepository};

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Insert a salon and return its id
    async fn add_salon(&self, salon: Salon) -> AppResult<i32>;

    /// Full overwrite; requires a non-zero `salon_id`
    async fn update_salon(&self, salon: Salon) -> AppResult<Salon>;

    async fn delete_salon(&self, id: i32) -> AppResult<()>;

    async fn get_salon(&self, id: i32) -> AppResult<Salon>;

    async fn list_salons(&self) -> AppResult<Vec<Salon>>;

    /// Insert a service and return its id
    async fn add_service(&self, service: Service) -> AppResult<i32>;

    /// Full overwrite; requires a non-zero `service_id`
    async fn update_service(&self, service: Service) -> AppResult<Service>;

    async fn delete_service(&self, id: i32) -> AppResult<()>;

    async fn get_service(&self, id: i32) -> AppResult<Service>;

    async fn list_services_by_salon(&self, salon_id: i32) -> AppResult<Vec<Service>>;

    /// Stored average rating of a salon
    async fn average_rating(&self, salon_id: i32) -> AppResult<f64>;
}

pub struct CatalogManager {
    salons: Arc<dyn SalonRepository>,
    services: Arc<dyn ServiceRepository>,
}

impl CatalogManager {
    pub fn new(salons: Arc<dyn SalonRepository>, services: Arc<dyn ServiceRepository>) -> Self {
        Self { salons, services }
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn add_salon(&self, salon: Salon) -> AppResult<i32> {
        let created = self.salons.create(salon).await?;
        tracing::info!(salon_id = created.salon_id, "Salon added");
        Ok(created.salon_id)
    }

    async fn update_salon(&self, salon: Salon) -> AppResult<Salon> {
        if salon.salon_id == 0 {
            return Err(AppError::validation("salon ID must be provided for update"));
        }
        self.salons.update(salon).await
    }

    async fn delete_salon(&self, id: i32) -> AppResult<()> {
        self.salons.delete(id).await?;
        tracing::info!(salon_id = id, "Salon deleted");
        Ok(())
    }

    async fn get_salon(&self, id: i32) -> AppResult<Salon> {
        self.salons.find_by_id(id).await?.ok_or_not_found("salon")
    }

    async fn list_salons(&self) -> AppResult<Vec<Salon>> {
        self.salons.list().await
    }

    async fn add_service(&self, service: Service) -> AppResult<i32> {
        let created = self.services.create(service).await?;
        tracing::info!(
            service_id = created.service_id,
            salon_id = created.salon_id,
            "Service added"
        );
        Ok(created.service_id)
    }

    async fn update_service(&self, service: Service) -> AppResult<Service> {
        if service.service_id == 0 {
            return Err(AppError::validation("service ID must be provided for update"));
        }
        self.services.update(service).await
    }

    async fn delete_service(&self, id: i32) -> AppResult<()> {
        self.services.delete(id).await
    }

    async fn get_service(&self, id: i32) -> AppResult<Service> {
        self.services.find_by_id(id).await?.ok_or_not_found("service")
    }

    async fn list_services_by_salon(&self, salon_id: i32) -> AppResult<Vec<Service>> {
        self.services.list_by_salon(salon_id).await
    }

    async fn average_rating(&self, salon_id: i32) -> AppResult<f64> {
        Ok(self.get_salon(salon_id).await?.average_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{MockSalonRepository, MockServiceRepository};
    use mockall::predicate::eq;

    fn salon(id: i32) -> Salon {
        Salon {
            salon_id: id,
            name: "Downtown Cuts".to_string(),
            average_rating: 4.5,
            ..Default::default()
        }
    }

    fn manager(salons: MockSalonRepository, services: MockServiceRepository) -> CatalogManager {
        CatalogManager::new(Arc::new(salons), Arc::new(services))
    }

    #[tokio::test]
    async fn test_add_salon_returns_generated_id() {
        let mut salons = MockSalonRepository::new();
        salons
            .expect_create()
            .returning(|s| Ok(Salon { salon_id: 42, ..s }));

        let service = manager(salons, MockServiceRepository::new());
        assert_eq!(service.add_salon(salon(0)).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_update_salon_without_id_writes_nothing() {
        let mut salons = MockSalonRepository::new();
        salons.expect_update().never();

        let service = manager(salons, MockServiceRepository::new());
        let err = service.update_salon(salon(0)).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "salon ID must be provided for update"));
    }

    #[tokio::test]
    async fn test_update_service_without_id_writes_nothing() {
        let mut services = MockServiceRepository::new();
        services.expect_update().never();

        let service = manager(MockSalonRepository::new(), services);
        let result = service.update_service(Service::default()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_salon_not_found() {
        let mut salons = MockSalonRepository::new();
        salons
            .expect_find_by_id()
            .with(eq(99))
            .returning(|_| Ok(None));

        let service = manager(salons, MockServiceRepository::new());
        assert!(matches!(
            service.get_salon(99).await,
            Err(AppError::NotFound("salon"))
        ));
    }

    #[tokio::test]
    async fn test_average_rating_reads_stored_value() {
        let mut salons = MockSalonRepository::new();
        salons
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(salon(id))));

        let service = manager(salons, MockServiceRepository::new());
        assert_eq!(service.average_rating(1).await.unwrap(), 4.5);
    }

    #[tokio::test]
    async fn test_average_rating_of_missing_salon() {
        let mut salons = MockSalonRepository::new();
        salons.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(salons, MockServiceRepository::new());
        assert!(matches!(
            service.average_rating(7).await,
            Err(AppError::NotFound("salon"))
        ));
    }
}
