//! Authentication service - registration, login and token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewUser, Password};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::UserRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Registration input after request validation
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub profile_image: String,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and return a token for it
    async fn register(&self, registration: Registration) -> AppResult<TokenResponse>;

    /// Check credentials and return a token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(username: &str, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: username.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService over a user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { users, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<TokenResponse> {
        if self
            .users
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("username already exists"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let user = self
            .users
            .create(NewUser {
                username: registration.username,
                password_hash,
                email: registration.email,
                profile_image: registration.profile_image,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        generate_token(&user.username, &self.config)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::invalid_credentials("user not found"))?;

        if !Password::from_hash(user.password_hash.as_str()).verify(&password) {
            tracing::warn!(username = %username, "Login rejected: invalid password");
            return Err(AppError::invalid_credentials("invalid password"));
        }

        self.users.record_login(&user.username, Utc::now()).await?;

        generate_token(&user.username, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
