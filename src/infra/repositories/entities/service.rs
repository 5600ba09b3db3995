//! Salon service (treatment) database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Service;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub service_id: i32,
    pub salon_id: i32,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Service {
    fn from(model: Model) -> Self {
        Service {
            service_id: model.service_id,
            salon_id: model.salon_id,
            name: model.name,
            description: model.description,
            duration: model.duration,
            price: model.price,
        }
    }
}
