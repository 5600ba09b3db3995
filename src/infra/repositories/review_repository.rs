//! Review repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::review::{self, ActiveModel, Entity as ReviewEntity};
use crate::domain::Review;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: Review) -> AppResult<Review>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>>;

    /// Overwrite every column of the row with `review.review_id`
    async fn update(&self, review: Review) -> AppResult<Review>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Review>>;

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>>;

    async fn list_by_rating(&self, rating: i32) -> AppResult<Vec<Review>>;
}

/// PostgreSQL-backed review repository
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_by(&self, column: review::Column, value: i32) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .filter(column.eq(value))
            .order_by_asc(review::Column::ReviewId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Review::from).collect())
    }
}

fn to_active_model(review: Review) -> ActiveModel {
    ActiveModel {
        review_id: NotSet,
        user_id: Set(review.user_id),
        salon_id: Set(review.salon_id),
        rating: Set(review.rating),
        comment: Set(review.comment),
        date_posted: Set(review.date_posted),
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn create(&self, review: Review) -> AppResult<Review> {
        let model = to_active_model(review).insert(&self.db).await?;
        Ok(Review::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        let result = ReviewEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Review::from))
    }

    async fn update(&self, review: Review) -> AppResult<Review> {
        let id = review.review_id;
        let mut active = to_active_model(review);
        active.review_id = Set(id);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_update(e, "review"))?;
        Ok(Review::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = ReviewEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("review"));
        }

        Ok(())
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Review>> {
        self.list_by(review::Column::SalonId, salon_id).await
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        self.list_by(review::Column::UserId, user_id).await
    }

    async fn list_by_rating(&self, rating: i32) -> AppResult<Vec<Review>> {
        self.list_by(review::Column::Rating, rating).await
    }
}
