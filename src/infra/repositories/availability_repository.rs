//! Availability repository.
//!
//! Status changes go through `set_status`, a single conditional UPDATE, so
//! two concurrent bookings of one slot cannot both succeed.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use super::entities::availability::{self, ActiveModel, Entity as AvailabilityEntity};
use crate::domain::{Availability, AvailabilityStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn create(&self, slot: Availability) -> AppResult<Availability>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Availability>>;

    /// Overwrite every column except `status` of the row with `slot.availability_id`
    async fn update(&self, slot: Availability) -> AppResult<Availability>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Availability>>;

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Availability>>;

    async fn list_by_status(&self, status: AvailabilityStatus) -> AppResult<Vec<Availability>>;

    /// Slots of one service at one salon in the given state
    async fn list_for_service_at_salon(
        &self,
        service_id: i32,
        salon_id: i32,
        status: AvailabilityStatus,
    ) -> AppResult<Vec<Availability>>;

    /// `start_date_time >= start AND end_date_time <= end`, compared as text
    async fn list_within(&self, start: String, end: String) -> AppResult<Vec<Availability>>;

    /// Move the slot to `to` only if its current status is one of `from`.
    /// Returns whether a row changed.
    async fn set_status(
        &self,
        id: i32,
        from: Vec<AvailabilityStatus>,
        to: AvailabilityStatus,
    ) -> AppResult<bool>;
}

/// PostgreSQL-backed availability repository
pub struct AvailabilityStore {
    db: DatabaseConnection,
}

impl AvailabilityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, condition: sea_orm::Condition) -> AppResult<Vec<Availability>> {
        AvailabilityEntity::find()
            .filter(condition)
            .order_by_asc(availability::Column::StartDateTime)
            .order_by_asc(availability::Column::AvailabilityId)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Availability::try_from)
            .collect()
    }
}

fn to_active_model(slot: Availability) -> ActiveModel {
    ActiveModel {
        availability_id: NotSet,
        salon_id: Set(slot.salon_id),
        service_id: Set(slot.service_id),
        start_date_time: Set(slot.start_date_time),
        end_date_time: Set(slot.end_date_time),
        status: Set(slot.status.to_string()),
    }
}

#[async_trait]
impl AvailabilityRepository for AvailabilityStore {
    async fn create(&self, slot: Availability) -> AppResult<Availability> {
        let model = to_active_model(slot).insert(&self.db).await?;
        Availability::try_from(model)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Availability>> {
        AvailabilityEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Availability::try_from)
            .transpose()
    }

    async fn update(&self, slot: Availability) -> AppResult<Availability> {
        let id = slot.availability_id;
        let mut active = to_active_model(slot);
        active.availability_id = Set(id);
        // Status moves only through the conditional set_status
        active.status = NotSet;

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_update(e, "availability"))?;
        Availability::try_from(model)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = AvailabilityEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("availability"));
        }

        Ok(())
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Availability>> {
        self.list_where(sea_orm::Condition::all().add(availability::Column::SalonId.eq(salon_id)))
            .await
    }

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Availability>> {
        self.list_where(
            sea_orm::Condition::all().add(availability::Column::ServiceId.eq(service_id)),
        )
        .await
    }

    async fn list_by_status(&self, status: AvailabilityStatus) -> AppResult<Vec<Availability>> {
        self.list_where(
            sea_orm::Condition::all().add(availability::Column::Status.eq(status.as_str())),
        )
        .await
    }

    async fn list_for_service_at_salon(
        &self,
        service_id: i32,
        salon_id: i32,
        status: AvailabilityStatus,
    ) -> AppResult<Vec<Availability>> {
        self.list_where(
            sea_orm::Condition::all()
                .add(availability::Column::ServiceId.eq(service_id))
                .add(availability::Column::SalonId.eq(salon_id))
                .add(availability::Column::Status.eq(status.as_str())),
        )
        .await
    }

    async fn list_within(&self, start: String, end: String) -> AppResult<Vec<Availability>> {
        self.list_where(
            sea_orm::Condition::all()
                .add(availability::Column::StartDateTime.gte(start))
                .add(availability::Column::EndDateTime.lte(end)),
        )
        .await
    }

    async fn set_status(
        &self,
        id: i32,
        from: Vec<AvailabilityStatus>,
        to: AvailabilityStatus,
    ) -> AppResult<bool> {
        let result = AvailabilityEntity::update_many()
            .col_expr(availability::Column::Status, Expr::value(to.as_str()))
            .filter(availability::Column::AvailabilityId.eq(id))
            .filter(availability::Column::Status.is_in(from.iter().map(|s| s.as_str())))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
