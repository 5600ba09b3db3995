//! Appointment service - reservations and their status lifecycle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{Appointment, AppointmentStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::AppointmentRepository;

#[async_trait]
pub trait AppointmentService: Send + Sync {
    async fn create(&self, appointment: Appointment) -> AppResult<Appointment>;

    async fn get(&self, id: i32) -> AppResult<Appointment>;

    /// Overwrite every field except `status`, which only `confirm` and
    /// `cancel` may change. Requires a non-zero `appointment_id`.
    async fn update(&self, appointment: Appointment) -> AppResult<Appointment>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Appointment>>;

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Appointment>>;

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Appointment>>;

    async fn list_by_status(&self, status: AppointmentStatus) -> AppResult<Vec<Appointment>>;

    async fn list_by_notification(&self, setting: String) -> AppResult<Vec<Appointment>>;

    async fn set_notification(&self, id: i32, setting: String) -> AppResult<Appointment>;

    /// Appointments at or after now
    async fn list_upcoming(&self) -> AppResult<Vec<Appointment>>;

    /// Appointments strictly before now
    async fn list_past(&self) -> AppResult<Vec<Appointment>>;

    /// Inclusive on both ends
    async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>>;

    async fn cancel(&self, id: i32) -> AppResult<Appointment>;

    async fn confirm(&self, id: i32) -> AppResult<Appointment>;

    /// Move to a new time; status is unchanged
    async fn reschedule(&self, id: i32, date_time: DateTime<Utc>) -> AppResult<Appointment>;
}

pub struct AppointmentManager {
    appointments: Arc<dyn AppointmentRepository>,
}

impl AppointmentManager {
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments }
    }

    async fn transition(&self, id: i32, to: AppointmentStatus) -> AppResult<Appointment> {
        let from = AppointmentStatus::sources_of(to);

        if !self.appointments.set_status(id, from, to).await? {
            let current = self.get(id).await?;
            tracing::warn!(
                appointment_id = id,
                current = %current.status,
                requested = %to,
                "Rejected appointment transition"
            );
            return Err(AppError::conflict(format!(
                "cannot change appointment from {} to {}",
                current.status, to
            )));
        }

        tracing::info!(appointment_id = id, status = %to, "Appointment status changed");
        self.get(id).await
    }
}

#[async_trait]
impl AppointmentService for AppointmentManager {
    async fn create(&self, appointment: Appointment) -> AppResult<Appointment> {
        let created = self.appointments.create(appointment).await?;
        tracing::info!(
            appointment_id = created.appointment_id,
            user_id = created.user_id,
            "Appointment created"
        );
        Ok(created)
    }

    async fn get(&self, id: i32) -> AppResult<Appointment> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or_not_found("appointment")
    }

    async fn update(&self, appointment: Appointment) -> AppResult<Appointment> {
        if appointment.appointment_id == 0 {
            return Err(AppError::validation(
                "appointment ID must be provided for update",
            ));
        }

        let current = self.get(appointment.appointment_id).await?;
        if current.status != appointment.status {
            tracing::warn!(
                appointment_id = appointment.appointment_id,
                current = %current.status,
                requested = %appointment.status,
                "Rejected status change through update"
            );
            return Err(AppError::conflict(
                "appointment status can only change through confirm or cancel",
            ));
        }

        self.appointments.update(appointment).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.appointments.delete(id).await
    }

    async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<Appointment>> {
        self.appointments.list_by_user(user_id).await
    }

    async fn list_by_salon(&self, salon_id: i32) -> AppResult<Vec<Appointment>> {
        self.appointments.list_by_salon(salon_id).await
    }

    async fn list_by_service(&self, service_id: i32) -> AppResult<Vec<Appointment>> {
        self.appointments.list_by_service(service_id).await
    }

    async fn list_by_status(&self, status: AppointmentStatus) -> AppResult<Vec<Appointment>> {
        self.appointments.list_by_status(status).await
    }

    async fn list_by_notification(&self, setting: String) -> AppResult<Vec<Appointment>> {
        self.appointments.list_by_notification(setting).await
    }

    async fn set_notification(&self, id: i32, setting: String) -> AppResult<Appointment> {
        self.appointments
            .set_notification(id, setting)
            .await?
            .ok_or_not_found("appointment")
    }

    async fn list_upcoming(&self) -> AppResult<Vec<Appointment>> {
        self.appointments.list_from(Utc::now()).await
    }

    async fn list_past(&self) -> AppResult<Vec<Appointment>> {
        self.appointments.list_before(Utc::now()).await
    }

    async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Appointment>> {
        self.appointments.list_between(start, end).await
    }

    async fn cancel(&self, id: i32) -> AppResult<Appointment> {
        self.transition(id, AppointmentStatus::Cancelled).await
    }

    async fn confirm(&self, id: i32) -> AppResult<Appointment> {
        self.transition(id, AppointmentStatus::Confirmed).await
    }

    async fn reschedule(&self, id: i32, date_time: DateTime<Utc>) -> AppResult<Appointment> {
        let allowed = AppointmentStatus::reschedulable();

        if !self
            .appointments
            .set_date_time(id, allowed, date_time)
            .await?
        {
            // Row exists but is cancelled, or is missing (NotFound from get)
            self.get(id).await?;
            return Err(AppError::conflict("cannot reschedule a cancelled appointment"));
        }

        tracing::info!(appointment_id = id, date_time = %date_time, "Appointment rescheduled");
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockAppointmentRepository;
    use chrono::TimeZone;
    use mockall::predicate::{always, eq};

    fn appointment(id: i32, status: AppointmentStatus) -> Appointment {
        Appointment {
            appointment_id: id,
            user_id: 3,
            salon_id: 5,
            service_id: 12,
            date_time: Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap(),
            status,
            notification_settings: "email".to_string(),
        }
    }

    #[tokio::test]
    async fn test_confirm_only_from_pending() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_set_status()
            .with(
                eq(1),
                eq(vec![AppointmentStatus::Pending]),
                eq(AppointmentStatus::Confirmed),
            )
            .times(1)
            .returning(|_, _, _| Ok(true));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(appointment(id, AppointmentStatus::Confirmed))));

        let service = AppointmentManager::new(Arc::new(repo));
        let confirmed = service.confirm(1).await.unwrap();

        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_confirm_cancelled_conflicts() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_set_status().returning(|_, _, _| Ok(false));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(appointment(id, AppointmentStatus::Cancelled))));

        let service = AppointmentManager::new(Arc::new(repo));
        let err = service.confirm(1).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_cancel_allowed_from_pending_or_confirmed() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_set_status()
            .with(
                eq(1),
                eq(vec![AppointmentStatus::Pending, AppointmentStatus::Confirmed]),
                eq(AppointmentStatus::Cancelled),
            )
            .returning(|_, _, _| Ok(true));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(appointment(id, AppointmentStatus::Cancelled))));

        let service = AppointmentManager::new(Arc::new(repo));
        assert_eq!(
            service.cancel(1).await.unwrap().status,
            AppointmentStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_transition_on_missing_appointment_not_found() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_set_status().returning(|_, _, _| Ok(false));
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = AppointmentManager::new(Arc::new(repo));
        assert!(matches!(
            service.cancel(77).await,
            Err(AppError::NotFound("appointment"))
        ));
    }

    #[tokio::test]
    async fn test_reschedule_cancelled_conflicts() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_set_date_time()
            .with(eq(1), eq(AppointmentStatus::reschedulable()), always())
            .returning(|_, _, _| Ok(false));
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(appointment(id, AppointmentStatus::Cancelled))));

        let service = AppointmentManager::new(Arc::new(repo));
        let result = service
            .reschedule(1, Utc.with_ymd_and_hms(2030, 2, 1, 9, 0, 0).unwrap())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_set_notification_missing_not_found() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_set_notification()
            .with(eq(9), eq("sms".to_string()))
            .returning(|_, _| Ok(None));

        let service = AppointmentManager::new(Arc::new(repo));
        assert!(matches!(
            service.set_notification(9, "sms".to_string()).await,
            Err(AppError::NotFound("appointment"))
        ));
    }

    #[tokio::test]
    async fn test_update_cannot_revive_cancelled() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(appointment(id, AppointmentStatus::Cancelled))));
        repo.expect_update().never();

        let service = AppointmentManager::new(Arc::new(repo));
        let result = service
            .update(appointment(1, AppointmentStatus::Pending))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_status_is_written() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(appointment(id, AppointmentStatus::Confirmed))));
        repo.expect_update()
            .withf(|a| a.service_id == 14)
            .times(1)
            .returning(Ok);

        let service = AppointmentManager::new(Arc::new(repo));
        let changed = Appointment {
            service_id: 14,
            ..appointment(1, AppointmentStatus::Confirmed)
        };

        assert_eq!(service.update(changed).await.unwrap().service_id, 14);
    }

    #[tokio::test]
    async fn test_update_without_id_writes_nothing() {
        let mut repo = MockAppointmentRepository::new();
        repo.expect_update().never();

        let service = AppointmentManager::new(Arc::new(repo));
        let result = service
            .update(appointment(0, AppointmentStatus::Pending))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
