//! Review database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Review;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub review_id: i32,
    pub user_id: i32,
    pub salon_id: i32,
    pub rating: i32,
    pub comment: String,
    pub date_posted: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Review {
            review_id: model.review_id,
            user_id: model.user_id,
            salon_id: model.salon_id,
            rating: model.rating,
            comment: model.comment,
            date_posted: model.date_posted,
        }
    }
}
