//! Appointment database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Appointment;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub appointment_id: i32,
    pub user_id: i32,
    pub salon_id: i32,
    pub service_id: i32,
    pub date_time: DateTimeUtc,
    /// `Pending`, `Confirmed` or `Cancelled`
    pub status: String,
    pub notification_settings: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Appointment {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model.status.parse().map_err(|_| {
            AppError::internal(format!(
                "appointment {} has unknown status '{}'",
                model.appointment_id, model.status
            ))
        })?;

        Ok(Appointment {
            appointment_id: model.appointment_id,
            user_id: model.user_id,
            salon_id: model.salon_id,
            service_id: model.service_id,
            date_time: model.date_time,
            status,
            notification_settings: model.notification_settings,
        })
    }
}
