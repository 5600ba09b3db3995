//! Repository for the services (treatments) a salon offers.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::service::{self, ActiveModel, Entity as ServiceEntity};
use crate::domain::Service;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: Service) -> AppResult<Service>;

    /// Overwrite every column of the row with `service.service_id`
    async fn update(&self, service: Service) -> AppResult<Service>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>>;

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Service>>;
}

/// PostgreSQL-backed service repository
pub struct ServiceStore {
    db: DatabaseConnection,
}

impl ServiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(service: Service) -> ActiveModel {
    ActiveModel {
        service_id: NotSet,
        salon_id: Set(service.salon_id),
        name: Set(service.name),
        description: Set(service.description),
        duration: Set(service.duration),
        price: Set(service.price),
    }
}

#[async_trait]
impl ServiceRepository for ServiceStore {
    async fn create(&self, service: Service) -> AppResult<Service> {
        let model = to_active_model(service).insert(&self.db).await?;
        Ok(Service::from(model))
    }

    async fn update(&self, service: Service) -> AppResult<Service> {
        let id = service.service_id;
        let mut active = to_active_model(service);
        active.service_id = Set(id);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_update(e, "service"))?;
        Ok(Service::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ServiceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("service"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        let result = ServiceEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Service::from))
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Service>> {
        let models = ServiceEntity::find()
            .filter(service::Column::SalonId.eq(salon_id))
            .order_by_asc(service::Column::ServiceId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Service::from).collect())
    }
}
