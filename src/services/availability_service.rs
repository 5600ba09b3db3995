//! Availability service - slot ledger and the Open/Booked state machine.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Availability, AvailabilityStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::AvailabilityRepository;

#[async_trait]
pub trait AvailabilityService: Send + Sync {
    async fn create(&self, slot: Availability) -> AppResult<Availability>;

    async fn get(&self, id: i32) -> AppResult<Availability>;

    /// Overwrite every field except `status`, which only `book` and
    /// `cancel_booking` may change. Requires a non-zero `availability_id`.
    async fn update(&self, slot: Availability) -> AppResult<Availability>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Availability>>;

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Availability>>;

    async fn list_by_status(&self, status: AvailabilityStatus) -> AppResult<Vec<Availability>>;

    async fn list_open(&self, service_id: i32, salon_id: i32) -> AppResult<Vec<Availability>>;

    async fn list_booked(&self, service_id: i32, salon_id: i32) -> AppResult<Vec<Availability>>;

    /// Slots starting at or after `start` and ending at or before `end`,
    /// compared as strings
    async fn list_by_date_range(&self, start: String, end: String) -> AppResult<Vec<Availability>>;

    /// Open -> Booked
    async fn book(&self, id: i32) -> AppResult<Availability>;

    /// Booked -> Open
    async fn cancel_booking(&self, id: i32) -> AppResult<Availability>;
}

pub struct AvailabilityManager {
    slots: Arc<dyn AvailabilityRepository>,
}

impl AvailabilityManager {
    pub fn new(slots: Arc<dyn AvailabilityRepository>) -> Self {
        Self { slots }
    }

    async fn transition(&self, id: i32, to: AvailabilityStatus) -> AppResult<Availability> {
        let from = AvailabilityStatus::sources_of(to);

        if !self.slots.set_status(id, from, to).await? {
            let current = self.slots.find_by_id(id).await?.ok_or_not_found("availability")?;
            tracing::warn!(
                availability_id = id,
                current = %current.status,
                requested = %to,
                "Rejected availability transition"
            );
            return Err(AppError::conflict(match to {
                AvailabilityStatus::Booked => "availability is already booked",
                AvailabilityStatus::Open => "availability is not booked",
            }));
        }

        tracing::info!(availability_id = id, status = %to, "Availability status changed");
        self.get(id).await
    }
}

#[async_trait]
impl AvailabilityService for AvailabilityManager {
    async fn create(&self, slot: Availability) -> AppResult<Availability> {
        let created = self.slots.create(slot).await?;
        tracing::info!(availability_id = created.availability_id, "Availability created");
        Ok(created)
    }

    async fn get(&self, id: i32) -> AppResult<Availability> {
        self.slots.find_by_id(id).await?.ok_or_not_found("availability")
    }

    async fn update(&self, slot: Availability) -> AppResult<Availability> {
        if slot.availability_id == 0 {
            return Err(AppError::validation(
                "availability ID must be provided for update",
            ));
        }

        let current = self.get(slot.availability_id).await?;
        if current.status != slot.status {
            tracing::warn!(
                availability_id = slot.availability_id,
                current = %current.status,
                requested = %slot.status,
                "Rejected status change through update"
            );
            return Err(AppError::conflict(
                "availability status can only change through book or cancel",
            ));
        }

        self.slots.update(slot).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.slots.delete(id).await
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Availability>> {
        self.slots.list_by_salon(salon_id).await
    }

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Availability>> {
        self.slots.list_by_service(service_id).await
    }

    async fn list_by_status(&self, status: AvailabilityStatus) -> AppResult<Vec<Availability>> {
        self.slots.list_by_status(status).await
    }

    async fn list_open(&self, service_id: i32, salon_id: i32) -> AppResult<Vec<Availability>> {
        self.slots
            .list_for_service_at_salon(service_id, salon_id, AvailabilityStatus::Open)
            .await
    }

    async fn list_booked(&self, service_id: i32, salon_id: i32) -> AppResult<Vec<Availability>> {
        self.slots
            .list_for_service_at_salon(service_id, salon_id, AvailabilityStatus::Booked)
            .await
    }

    async fn list_by_date_range(&self, start: String, end: String) -> AppResult<Vec<Availability>> {
        self.slots.list_within(start, end).await
    }

    async fn book(&self, id: i32) -> AppResult<Availability> {
        self.transition(id, AvailabilityStatus::Booked).await
    }

    async fn cancel_booking(&self, id: i32) -> AppResult<Availability> {
        self.transition(id, AvailabilityStatus::Open).await
    }
}
