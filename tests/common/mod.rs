//! Shared helpers for integration tests: in-memory repositories with the
//! same conditional-update semantics as the SeaORM stores, plus request
//! helpers for driving the router.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use bookmysalon::api::{create_router, AppState};
use bookmysalon::config::Config;
use bookmysalon::domain::{
    Appointment, AppointmentStatus, Availability, AvailabilityStatus, NewUser, Review, Salon,
    Service, User,
};
use bookmysalon::errors::{AppError, AppResult};
use bookmysalon::infra::repositories::{
    AppointmentRepository, AvailabilityRepository, Repositories, ReviewRepository,
    SalonRepository, ServiceRepository, UserRepository,
};
use bookmysalon::services::Services;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Rows keyed by id with a serial counter starting at 1.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, assign: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = assign(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| pred(r)).cloned().collect()
    }
}

type Shared<T> = Mutex<Table<T>>;

fn shared<T: Clone>() -> Shared<T> {
    Mutex::new(Table::new())
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<BTreeMap<String, User>>,
    next_id: Mutex<i32>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.rows.lock().unwrap().get(username).cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&user.username) {
            return Err(AppError::conflict("username already exists"));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = User {
            id: *next_id,
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            profile_image: user.profile_image,
            date_joined: Utc::now(),
            last_login: None,
        };
        rows.insert(created.username.clone(), created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        username: &str,
        email: String,
        profile_image: String,
    ) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows.get_mut(username).ok_or(AppError::NotFound("user"))?;
        user.email = email;
        user.profile_image = profile_image;
        Ok(user.clone())
    }

    async fn update_password(&self, username: &str, password_hash: String) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows.get_mut(username).ok_or(AppError::NotFound("user"))?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn record_login(&self, username: &str, at: DateTime<Utc>) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows.get_mut(username).ok_or(AppError::NotFound("user"))?;
        user.last_login = Some(at);
        Ok(())
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        self.rows
            .lock()
            .unwrap()
            .remove(username)
            .map(|_| ())
            .ok_or(AppError::NotFound("user"))
    }
}

pub struct InMemorySalons(Shared<Salon>);

#[async_trait]
impl SalonRepository for InMemorySalons {
    async fn create(&self, salon: Salon) -> AppResult<Salon> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .insert(|salon_id| Salon { salon_id, ..salon }))
    }

    async fn update(&self, salon: Salon) -> AppResult<Salon> {
        let mut table = self.0.lock().unwrap();
        let row = table
            .rows
            .get_mut(&salon.salon_id)
            .ok_or(AppError::NotFound("salon"))?;
        *row = salon.clone();
        Ok(salon)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound("salon"))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Salon>> {
        Ok(self.0.lock().unwrap().rows.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Salon>> {
        Ok(self.0.lock().unwrap().filter(|_| true))
    }
}

pub struct InMemoryServices(Shared<Service>);

#[async_trait]
impl ServiceRepository for InMemoryServices {
    async fn create(&self, service: Service) -> AppResult<Service> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .insert(|service_id| Service { service_id, ..service }))
    }

    async fn update(&self, service: Service) -> AppResult<Service> {
        let mut table = self.0.lock().unwrap();
        let row = table
            .rows
            .get_mut(&service.service_id)
            .ok_or(AppError::NotFound("service"))?;
        *row = service.clone();
        Ok(service)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound("service"))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Service>> {
        Ok(self.0.lock().unwrap().rows.get(&id).cloned())
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Service>> {
        Ok(self.0.lock().unwrap().filter(|s| s.salon_id == salon_id))
    }
}

pub struct InMemoryAvailability(Shared<Availability>);

#[async_trait]
impl AvailabilityRepository for InMemoryAvailability {
    async fn create(&self, slot: Availability) -> AppResult<Availability> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .insert(|availability_id| Availability { availability_id, ..slot }))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Availability>> {
        Ok(self.0.lock().unwrap().rows.get(&id).cloned())
    }

    async fn update(&self, slot: Availability) -> AppResult<Availability> {
        let mut table = self.0.lock().unwrap();
        let row = table
            .rows
            .get_mut(&slot.availability_id)
            .ok_or(AppError::NotFound("availability"))?;
        let status = row.status;
        *row = slot;
        row.status = status;
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound("availability"))
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Availability>> {
        Ok(self.0.lock().unwrap().filter(|s| s.salon_id == salon_id))
    }

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Availability>> {
        Ok(self.0.lock().unwrap().filter(|s| s.service_id == service_id))
    }

    async fn list_by_status(&self, status: AvailabilityStatus) -> AppResult<Vec<Availability>> {
        Ok(self.0.lock().unwrap().filter(|s| s.status == status))
    }

    async fn list_for_service_at_salon(
        &self,
        service_id: i32,
        salon_id: i32,
        status: AvailabilityStatus,
    ) -> AppResult<Vec<Availability>> {
        Ok(self.0.lock().unwrap().filter(|s| {
            s.service_id == service_id && s.salon_id == salon_id && s.status == status
        }))
    }

    async fn list_within(&self, start: String, end: String) -> AppResult<Vec<Availability>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .filter(|s| s.start_date_time >= start && s.end_date_time <= end))
    }

    async fn set_status(
        &self,
        id: i32,
        from: Vec<AvailabilityStatus>,
        to: AvailabilityStatus,
    ) -> AppResult<bool> {
        let mut table = self.0.lock().unwrap();
        match table.rows.get_mut(&id) {
            Some(slot) if from.contains(&slot.status) => {
                slot.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

pub struct InMemoryAppointments(Shared<Appointment>);

#[async_trait]
impl AppointmentRepository for InMemoryAppointments {
    async fn create(&self, appointment: Appointment) -> AppResult<Appointment> {
        Ok(self.0.lock().unwrap().insert(|appointment_id| Appointment {
            appointment_id,
            ..appointment
        }))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Appointment>> {
        Ok(self.0.lock().unwrap().rows.get(&id).cloned())
    }

    async fn update(&self, appointment: Appointment) -> AppResult<Appointment> {
        let mut table = self.0.lock().unwrap();
        let row = table
            .rows
            .get_mut(&appointment.appointment_id)
            .ok_or(AppError::NotFound("appointment"))?;
        let status = row.status;
        *row = appointment;
        row.status = status;
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound("appointment"))
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Appointment>> {
        Ok(self.0.lock().unwrap().filter(|a| a.user_id == user_id))
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Appointment>> {
        Ok(self.0.lock().unwrap().filter(|a| a.salon_id == salon_id))
    }

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Appointment>> {
        Ok(self.0.lock().unwrap().filter(|a| a.service_id == service_id))
    }

    async fn list_by_status(&self, status: AppointmentStatus) -> AppResult<Vec<Appointment>> {
        Ok(self.0.lock().unwrap().filter(|a| a.status == status))
    }

    async fn list_by_notification(&self, setting: String) -> AppResult<Vec<Appointment>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .filter(|a| a.notification_settings == setting))
    }

    async fn list_from(&self, at: DateTime<Utc>) -> AppResult<Vec<Appointment>> {
        Ok(self.0.lock().unwrap().filter(|a| a.date_time >= at))
    }

    async fn list_before(&self, at: DateTime<Utc>) -> AppResult<Vec<Appointment>> {
        Ok(self.0.lock().unwrap().filter(|a| a.date_time < at))
    }

    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .filter(|a| a.date_time >= start && a.date_time <= end))
    }

    async fn set_notification(&self, id: i32, setting: String) -> AppResult<Option<Appointment>> {
        let mut table = self.0.lock().unwrap();
        Ok(table.rows.get_mut(&id).map(|a| {
            a.notification_settings = setting;
            a.clone()
        }))
    }

    async fn set_status(
        &self,
        id: i32,
        from: Vec<AppointmentStatus>,
        to: AppointmentStatus,
    ) -> AppResult<bool> {
        let mut table = self.0.lock().unwrap();
        match table.rows.get_mut(&id) {
            Some(a) if from.contains(&a.status) => {
                a.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_date_time(
        &self,
        id: i32,
        allowed: Vec<AppointmentStatus>,
        date_time: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut table = self.0.lock().unwrap();
        match table.rows.get_mut(&id) {
            Some(a) if allowed.contains(&a.status) => {
                a.date_time = date_time;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

pub struct InMemoryReviews(Shared<Review>);

#[async_trait]
impl ReviewRepository for InMemoryReviews {
    async fn create(&self, review: Review) -> AppResult<Review> {
        Ok(self
            .0
            .lock()
            .unwrap()
            .insert(|review_id| Review { review_id, ..review }))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        Ok(self.0.lock().unwrap().rows.get(&id).cloned())
    }

    async fn update(&self, review: Review) -> AppResult<Review> {
        let mut table = self.0.lock().unwrap();
        let row = table
            .rows
            .get_mut(&review.review_id)
            .ok_or(AppError::NotFound("review"))?;
        *row = review.clone();
        Ok(review)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound("review"))
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Review>> {
        Ok(self.0.lock().unwrap().filter(|r| r.salon_id == salon_id))
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Review>> {
        Ok(self.0.lock().unwrap().filter(|r| r.user_id == user_id))
    }

    async fn list_by_rating(&self, rating: i32) -> AppResult<Vec<Review>> {
        Ok(self.0.lock().unwrap().filter(|r| r.rating == rating))
    }
}

pub fn in_memory_repositories() -> Repositories {
    Repositories {
        users: Arc::new(InMemoryUsers::default()),
        salons: Arc::new(InMemorySalons(shared())),
        services: Arc::new(InMemoryServices(shared())),
        availability: Arc::new(InMemoryAvailability(shared())),
        appointments: Arc::new(InMemoryAppointments(shared())),
        reviews: Arc::new(InMemoryReviews(shared())),
    }
}

pub fn test_config() -> Config {
    Config::new("postgres://unused/test", TEST_SECRET).unwrap()
}

pub fn test_services() -> Services {
    Services::from_repositories(in_memory_repositories(), test_config())
}

/// Router over fresh in-memory state with no database attached.
pub fn test_app() -> Router {
    create_router(AppState::from_services(&test_services(), None))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, value)
}

/// Register `username` and return its access token.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(serde_json::json!({
            "username": username,
            "password": password,
            "email": format!("{}@example.com", username)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);

    body["access_token"].as_str().unwrap().to_string()
}
