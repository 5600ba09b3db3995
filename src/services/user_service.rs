//! User service - profile and account management for the signed-in user.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, UserProfile};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::UserRepository;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn profile(&self, username: &str) -> AppResult<UserProfile>;

    /// Overwrite email and profile image
    async fn update_profile(
        &self,
        username: &str,
        email: String,
        profile_image: String,
    ) -> AppResult<UserProfile>;

    /// Replace the password after checking the current one
    async fn change_password(
        &self,
        username: &str,
        old_password: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Permanently remove the account
    async fn delete_account(&self, username: &str) -> AppResult<()>;
}

pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn profile(&self, username: &str) -> AppResult<UserProfile> {
        self.users
            .find_by_username(username)
            .await?
            .map(UserProfile::from)
            .ok_or_not_found("user")
    }

    async fn update_profile(
        &self,
        username: &str,
        email: String,
        profile_image: String,
    ) -> AppResult<UserProfile> {
        let user = self
            .users
            .update_profile(username, email, profile_image)
            .await?;
        Ok(UserProfile::from(user))
    }

    async fn change_password(
        &self,
        username: &str,
        old_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_not_found("user")?;

        if !Password::from_hash(user.password_hash).verify(&old_password) {
            return Err(AppError::invalid_credentials("invalid password"));
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.users.update_password(username, password_hash).await?;

        tracing::info!(username = %username, "Password changed");
        Ok(())
    }

    async fn delete_account(&self, username: &str) -> AppResult<()> {
        self.users.delete(username).await?;
        tracing::info!(username = %username, "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infra::repositories::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn stored_user(password: &str) -> User {
        User {
            id: 4,
            username: "alice".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            email: "alice@example.com".to_string(),
            profile_image: String::new(),
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("ghost"))
            .returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.profile("ghost").await;

        assert!(matches!(result, Err(AppError::NotFound("user"))));
    }

    #[tokio::test]
    async fn test_change_password_rejects_wrong_old_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("secret123"))));
        repo.expect_update_password().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .change_password("alice", "not-it".to_string(), "newsecret1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_change_password_stores_new_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("secret123"))));
        repo.expect_update_password()
            .withf(|name, hash| {
                name == "alice" && Password::from_hash(hash.as_str()).verify("newsecret1")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserManager::new(Arc::new(repo));
        service
            .change_password("alice", "secret123".to_string(), "newsecret1".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_change_password_too_short() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("secret123"))));
        repo.expect_update_password().never();

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .change_password("alice", "secret123".to_string(), "short".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
