//! Availability slot database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Availability;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "availability")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub availability_id: i32,
    pub salon_id: i32,
    pub service_id: i32,
    pub start_date_time: String,
    pub end_date_time: String,
    /// `Open` or `Booked`
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Availability {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model.status.parse().map_err(|_| {
            AppError::internal(format!(
                "availability {} has unknown status '{}'",
                model.availability_id, model.status
            ))
        })?;

        Ok(Availability {
            availability_id: model.availability_id,
            salon_id: model.salon_id,
            service_id: model.service_id,
            start_date_time: model.start_date_time,
            end_date_time: model.end_date_time,
            status,
        })
    }
}
