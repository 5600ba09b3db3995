//! Salon repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use super::entities::salon::{self, ActiveModel, Entity as SalonEntity};
use crate::domain::Salon;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SalonRepository: Send + Sync {
    /// Insert a salon; the id on the input is ignored
    async fn create(&self, salon: Salon) -> AppResult<Salon>;

    /// Overwrite every column of the row with `salon.salon_id`
    async fn update(&self, salon: Salon) -> AppResult<Salon>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Salon>>;

    async fn list(&self) -> AppResult<Vec<Salon>>;
}

/// PostgreSQL-backed salon repository
pub struct SalonStore {
    db: DatabaseConnection,
}

impl SalonStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_active_model(salon: Salon) -> ActiveModel {
    ActiveModel {
        salon_id: NotSet,
        name: Set(salon.name),
        address: Set(salon.address),
        contact_details: Set(salon.contact_details),
        photos: Set(salon.photos),
        average_rating: Set(salon.average_rating),
    }
}

#[async_trait]
impl SalonRepository for SalonStore {
    async fn create(&self, salon: Salon) -> AppResult<Salon> {
        let model = to_active_model(salon).insert(&self.db).await?;
        Ok(Salon::from(model))
    }

    async fn update(&self, salon: Salon) -> AppResult<Salon> {
        let id = salon.salon_id;
        let mut active = to_active_model(salon);
        active.salon_id = Set(id);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_update(e, "salon"))?;
        Ok(Salon::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = SalonEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("salon"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Salon>> {
        let result = SalonEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Salon::from))
    }

    async fn list(&self) -> AppResult<Vec<Salon>> {
        let models = SalonEntity::find()
            .order_by_asc(salon::Column::SalonId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Salon::from).collect())
    }
}
