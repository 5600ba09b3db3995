//! Appointment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    NotSet, QueryFilter, QueryOrder, Set,
};

use super::entities::appointment::{self, ActiveModel, Entity as AppointmentEntity};
use crate::domain::{Appointment, AppointmentStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: Appointment) -> AppResult<Appointment>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Appointment>>;

    /// Overwrite every column except `status` of the row with `appointment.appointment_id`
    async fn update(&self, appointment: Appointment) -> AppResult<Appointment>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Appointment>>;

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Appointment>>;

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Appointment>>;

    async fn list_by_status(&self, status: AppointmentStatus) -> AppResult<Vec<Appointment>>;

    async fn list_by_notification(&self, setting: String) -> AppResult<Vec<Appointment>>;

    /// `date_time >= at`
    async fn list_from(&self, at: DateTime<Utc>) -> AppResult<Vec<Appointment>>;

    /// `date_time < at`
    async fn list_before(&self, at: DateTime<Utc>) -> AppResult<Vec<Appointment>>;

    /// `start <= date_time <= end`
    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>>;

    /// Set the notification preference and return the updated row
    async fn set_notification(&self, id: i32, setting: String) -> AppResult<Option<Appointment>>;

    /// Move to `to` only if the current status is one of `from`.
    /// Returns whether a row changed.
    async fn set_status(
        &self,
        id: i32,
        from: Vec<AppointmentStatus>,
        to: AppointmentStatus,
    ) -> AppResult<bool>;

    /// Change the time only while the status is one of `allowed`.
    /// Returns whether a row changed.
    async fn set_date_time(
        &self,
        id: i32,
        allowed: Vec<AppointmentStatus>,
        date_time: DateTime<Utc>,
    ) -> AppResult<bool>;
}

/// PostgreSQL-backed appointment repository
pub struct AppointmentStore {
    db: DatabaseConnection,
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, condition: Condition) -> AppResult<Vec<Appointment>> {
        AppointmentEntity::find()
            .filter(condition)
            .order_by_asc(appointment::Column::DateTime)
            .order_by_asc(appointment::Column::AppointmentId)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Appointment::try_from)
            .collect()
    }

    fn status_in(statuses: &[AppointmentStatus]) -> sea_orm::sea_query::SimpleExpr {
        appointment::Column::Status.is_in(statuses.iter().map(|s| s.as_str()))
    }
}

fn to_active_model(appointment: Appointment) -> ActiveModel {
    ActiveModel {
        appointment_id: NotSet,
        user_id: Set(appointment.user_id),
        salon_id: Set(appointment.salon_id),
        service_id: Set(appointment.service_id),
        date_time: Set(appointment.date_time),
        status: Set(appointment.status.to_string()),
        notification_settings: Set(appointment.notification_settings),
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentStore {
    async fn create(&self, appointment: Appointment) -> AppResult<Appointment> {
        let model = to_active_model(appointment).insert(&self.db).await?;
        Appointment::try_from(model)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Appointment>> {
        AppointmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn update(&self, appointment: Appointment) -> AppResult<Appointment> {
        let id = appointment.appointment_id;
        let mut active = to_active_model(appointment);
        active.appointment_id = Set(id);
        // Status moves only through the conditional set_status
        active.status = NotSet;

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_update(e, "appointment"))?;
        Appointment::try_from(model)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = AppointmentEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("appointment"));
        }

        Ok(())
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Appointment>> {
        self.list_where(Condition::all().add(appointment::Column::UserId.eq(user_id)))
            .await
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Appointment>> {
        self.list_where(Condition::all().add(appointment::Column::SalonId.eq(salon_id)))
            .await
    }

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Appointment>> {
        self.list_where(Condition::all().add(appointment::Column::ServiceId.eq(service_id)))
            .await
    }

    async fn list_by_status(&self, status: AppointmentStatus) -> AppResult<Vec<Appointment>> {
        self.list_where(Condition::all().add(appointment::Column::Status.eq(status.as_str())))
            .await
    }

    async fn list_by_notification(&self, setting: String) -> AppResult<Vec<Appointment>> {
        self.list_where(
            Condition::all().add(appointment::Column::NotificationSettings.eq(setting)),
        )
        .await
    }

    async fn list_from(&self, at: DateTime<Utc>) -> AppResult<Vec<Appointment>> {
        self.list_where(Condition::all().add(appointment::Column::DateTime.gte(at)))
            .await
    }

    async fn list_before(&self, at: DateTime<Utc>) -> AppResult<Vec<Appointment>> {
        self.list_where(Condition::all().add(appointment::Column::DateTime.lt(at)))
            .await
    }

    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        self.list_where(
            Condition::all()
                .add(appointment::Column::DateTime.gte(start))
                .add(appointment::Column::DateTime.lte(end)),
        )
        .await
    }

    async fn set_notification(&self, id: i32, setting: String) -> AppResult<Option<Appointment>> {
        let result = AppointmentEntity::update_many()
            .col_expr(appointment::Column::NotificationSettings, Expr::value(setting))
            .filter(appointment::Column::AppointmentId.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    async fn set_status(
        &self,
        id: i32,
        from: Vec<AppointmentStatus>,
        to: AppointmentStatus,
    ) -> AppResult<bool> {
        let result = AppointmentEntity::update_many()
            .col_expr(appointment::Column::Status, Expr::value(to.as_str()))
            .filter(appointment::Column::AppointmentId.eq(id))
            .filter(Self::status_in(&from))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn set_date_time(
        &self,
        id: i32,
        allowed: Vec<AppointmentStatus>,
        date_time: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = AppointmentEntity::update_many()
            .col_expr(appointment::Column::DateTime, Expr::value(date_time))
            .filter(appointment::Column::AppointmentId.eq(id))
            .filter(Self::status_in(&allowed))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
