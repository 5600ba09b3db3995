//! Salon database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Salon;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "salons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub salon_id: i32,
    pub name: String,
    pub address: String,
    pub contact_details: String,
    pub photos: String,
    pub average_rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Salon {
    fn from(model: Model) -> Self {
        Salon {
            salon_id: model.salon_id,
            name: model.name,
            address: model.address,
            contact_details: model.contact_details,
            photos: model.photos,
            average_rating: model.average_rating,
        }
    }
}
