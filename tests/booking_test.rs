//! Service-level tests for slot booking and appointment transitions.

mod common;

use chrono::{TimeZone, Utc};
use tokio_test::{assert_err, assert_ok};

use bookmysalon::domain::{Appointment, AppointmentStatus, Availability, AvailabilityStatus};
use bookmysalon::errors::AppError;
use bookmysalon::services::ServiceContainer;

use common::test_services;

fn slot(salon_id: i32, service_id: i32) -> Availability {
    Availability {
        availability_id: 0,
        salon_id,
        service_id,
        start_date_time: "2023-07-10T10:00:00Z".to_string(),
        end_date_time: "2023-07-10T11:00:00Z".to_string(),
        status: AvailabilityStatus::Open,
    }
}

#[tokio::test]
async fn test_concurrent_bookings_single_winner() {
    let availability = test_services().availability();
    let created = availability.create(slot(5, 12)).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let availability = availability.clone();
            let id = created.availability_id;
            tokio::spawn(async move { availability.book(id).await })
        })
        .collect();

    let mut booked = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(slot) => {
                assert_eq!(slot.status, AvailabilityStatus::Booked);
                booked += 1;
            }
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(conflicts, 7);
}

#[tokio::test]
async fn test_open_listing_scoped_to_service_and_salon() {
    let availability = test_services().availability();
    let target = availability.create(slot(5, 12)).await.unwrap();
    availability.create(slot(5, 13)).await.unwrap();
    availability.create(slot(6, 12)).await.unwrap();

    let open = availability.list_open(12, 5).await.unwrap();
    assert_eq!(open, vec![target.clone()]);

    availability.book(target.availability_id).await.unwrap();
    assert!(availability.list_open(12, 5).await.unwrap().is_empty());
    assert_eq!(availability.list_booked(12, 5).await.unwrap().len(), 1);
    assert_eq!(
        availability
            .list_by_status(AvailabilityStatus::Open)
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_update_cannot_reopen_booked_slot() {
    let availability = test_services().availability();
    let created = assert_ok!(availability.create(slot(1, 1)).await);
    let id = created.availability_id;
    assert_ok!(availability.book(id).await);

    let err = assert_err!(
        availability
            .update(Availability {
                availability_id: id,
                ..slot(1, 1)
            })
            .await
    );
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(
        availability.get(id).await.unwrap().status,
        AvailabilityStatus::Booked
    );
    assert!(matches!(availability.book(id).await, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_update_keeps_status_and_changes_times() {
    let availability = test_services().availability();
    let created = assert_ok!(availability.create(slot(1, 1)).await);

    let updated = assert_ok!(
        availability
            .update(Availability {
                end_date_time: "2023-07-10T11:30:00Z".to_string(),
                ..created.clone()
            })
            .await
    );

    assert_eq!(updated.end_date_time, "2023-07-10T11:30:00Z");
    assert_eq!(updated.status, AvailabilityStatus::Open);
    assert_ok!(availability.book(created.availability_id).await);
}

#[tokio::test]
async fn test_update_cannot_revive_cancelled_appointment() {
    let appointments = test_services().appointments();
    let created = appointments
        .create(Appointment {
            appointment_id: 0,
            user_id: 3,
            salon_id: 5,
            service_id: 12,
            date_time: Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            notification_settings: "email".to_string(),
        })
        .await
        .unwrap();
    let id = created.appointment_id;
    assert_ok!(appointments.cancel(id).await);

    let err = assert_err!(appointments.update(created.clone()).await);
    assert!(matches!(err, AppError::Conflict(_)));

    assert_eq!(
        appointments.get(id).await.unwrap().status,
        AppointmentStatus::Cancelled
    );
    assert!(matches!(appointments.confirm(id).await, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_cancelled_appointment_is_terminal() {
    let appointments = test_services().appointments();
    let created = appointments
        .create(Appointment {
            appointment_id: 0,
            user_id: 3,
            salon_id: 5,
            service_id: 12,
            date_time: Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            notification_settings: "email".to_string(),
        })
        .await
        .unwrap();
    let id = created.appointment_id;

    let cancelled = appointments.cancel(id).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    assert!(matches!(appointments.confirm(id).await, Err(AppError::Conflict(_))));
    assert!(matches!(appointments.cancel(id).await, Err(AppError::Conflict(_))));

    let err = assert_err!(
        appointments
            .reschedule(id, Utc.with_ymd_and_hms(2030, 2, 1, 9, 0, 0).unwrap())
            .await
    );
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(appointments.get(id).await.unwrap().date_time, created.date_time);
}

#[tokio::test]
async fn test_delete_missing_rows_not_found() {
    let services = test_services();

    assert!(matches!(
        services.availability().delete(41).await,
        Err(AppError::NotFound("availability"))
    ));
    assert!(matches!(
        services.appointments().delete(41).await,
        Err(AppError::NotFound("appointment"))
    ));
    assert!(matches!(
        services.catalog().delete_salon(41).await,
        Err(AppError::NotFound("salon"))
    ));
    assert!(matches!(
        services.reviews().delete(41).await,
        Err(AppError::NotFound("review"))
    ));
}
