//! Review service.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

use crate::domain::Review;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::ReviewRepository;

#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Insert a review; a blank `date_posted` is set to now
    async fn create(&self, review: Review) -> AppResult<Review>;

    async fn get(&self, id: i32) -> AppResult<Review>;

    /// Full overwrite; requires a non-zero `review_id`
    async fn update(&self, review: Review) -> AppResult<Review>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Review>>;

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>>;

    async fn list_by_rating(&self, rating: i32) -> AppResult<Vec<Review>>;
}

pub struct ReviewManager {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewManager {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }
}

#[async_trait]
impl ReviewService for ReviewManager {
    async fn create(&self, mut review: Review) -> AppResult<Review> {
        if review.date_posted.trim().is_empty() {
            review.date_posted = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        }

        let created = self.reviews.create(review).await?;
        tracing::info!(
            review_id = created.review_id,
            salon_id = created.salon_id,
            rating = created.rating,
            "Review posted"
        );
        Ok(created)
    }

    async fn get(&self, id: i32) -> AppResult<Review> {
        self.reviews.find_by_id(id).await?.ok_or_not_found("review")
    }

    async fn update(&self, review: Review) -> AppResult<Review> {
        if review.review_id == 0 {
            return Err(AppError::validation("review ID must be provided for update"));
        }
        self.reviews.update(review).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.reviews.delete(id).await
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Review>> {
        self.reviews.list_by_salon(salon_id).await
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        self.reviews.list_by_user(user_id).await
    }

    async fn list_by_rating(&self, rating: i32) -> AppResult<Vec<Review>> {
        self.reviews.list_by_rating(rating).await
    }
}
