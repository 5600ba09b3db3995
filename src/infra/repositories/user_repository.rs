//! User repository: accounts keyed by username.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by unique username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new account; Conflict if the username is taken
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Overwrite email and profile image
    async fn update_profile(
        &self,
        username: &str,
        email: String,
        profile_image: String,
    ) -> AppResult<User>;

    /// Replace the stored password hash
    async fn update_password(&self, username: &str, password_hash: String) -> AppResult<()>;

    /// Stamp the last successful login
    async fn record_login(&self, username: &str, at: DateTime<Utc>) -> AppResult<()>;

    /// Permanently delete the account
    async fn delete(&self, username: &str) -> AppResult<()>;
}

/// PostgreSQL-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, username: &str) -> AppResult<Option<user::Model>> {
        UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.find_model(username).await?.map(User::from))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            email: Set(user.email),
            profile_image: Set(user.profile_image),
            date_joined: Set(Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };

        match active_model.insert(&self.db).await {
            Ok(model) => Ok(User::from(model)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AppError::conflict("username already exists"))
            }
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn update_profile(
        &self,
        username: &str,
        email: String,
        profile_image: String,
    ) -> AppResult<User> {
        let model = self
            .find_model(username)
            .await?
            .ok_or(AppError::NotFound("user"))?;

        let mut active: ActiveModel = model.into();
        active.email = Set(email);
        active.profile_image = Set(profile_image);

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::from_update(e, "user"))?;
        Ok(User::from(model))
    }

    async fn update_password(&self, username: &str, password_hash: String) -> AppResult<()> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .filter(user::Column::Username.eq(username))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("user"));
        }

        Ok(())
    }

    async fn record_login(&self, username: &str, at: DateTime<Utc>) -> AppResult<()> {
        UserEntity::update_many()
            .col_expr(user::Column::LastLogin, Expr::value(Some(at)))
            .filter(user::Column::Username.eq(username))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        let result = UserEntity::delete_many()
            .filter(user::Column::Username.eq(username))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("user"));
        }

        Ok(())
    }
}
