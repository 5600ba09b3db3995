//! OpenAPI documentation served through Swagger UI.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    appointment_handler, auth_handler, availability_handler, review_handler, salon_handler,
    user_handler,
};
use crate::domain::{
    Appointment, AppointmentStatus, Availability, AvailabilityStatus, AverageRating, Review, Salon,
    SalonCreated, Service, ServiceCreated, UserProfile,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BookMySalon API",
        version = "0.1.0",
        description = "Salon discovery, slot booking, appointments and reviews"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        user_handler::get_profile,
        user_handler::update_profile,
        user_handler::delete_account,
        user_handler::change_password,
        salon_handler::add_salon,
        salon_handler::update_salon,
        salon_handler::list_salons,
        salon_handler::get_salon,
        salon_handler::delete_salon,
        salon_handler::list_services_by_salon,
        salon_handler::get_average_rating,
        salon_handler::add_service,
        salon_handler::update_service,
        salon_handler::get_service,
        salon_handler::delete_service,
        availability_handler::create_availability,
        availability_handler::update_availability,
        availability_handler::get_availability,
        availability_handler::delete_availability,
        availability_handler::book_availability,
        availability_handler::cancel_booking,
        availability_handler::list_by_salon,
        availability_handler::list_by_service,
        availability_handler::list_by_status,
        availability_handler::list_open,
        availability_handler::list_booked,
        availability_handler::list_by_date_range,
        appointment_handler::create_appointment,
        appointment_handler::update_appointment,
        appointment_handler::get_appointment,
        appointment_handler::delete_appointment,
        appointment_handler::set_notification,
        appointment_handler::cancel_appointment,
        appointment_handler::confirm_appointment,
        appointment_handler::reschedule_appointment,
        appointment_handler::list_by_user,
        appointment_handler::list_by_salon,
        appointment_handler::list_by_service,
        appointment_handler::list_by_status,
        appointment_handler::list_by_notification,
        appointment_handler::list_upcoming,
        appointment_handler::list_past,
        appointment_handler::list_by_date_range,
        review_handler::create_review,
        review_handler::get_review,
        review_handler::update_review,
        review_handler::delete_review,
        review_handler::list_by_salon,
        review_handler::list_by_user,
        review_handler::list_by_rating,
    ),
    components(
        schemas(
            UserProfile,
            Salon,
            Service,
            SalonCreated,
            ServiceCreated,
            AverageRating,
            AvailabilityStatus,
            Availability,
            AppointmentStatus,
            Appointment,
            Review,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            user_handler::UpdateProfileRequest,
            user_handler::ChangePasswordRequest,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Profile", description = "The signed-in user's account"),
        (name = "Salons", description = "Salon and service catalog"),
        (name = "Availability", description = "Bookable time slots"),
        (name = "Appointments", description = "Reservations and their lifecycle"),
        (name = "Reviews", description = "Customer reviews")
    )
)]
pub struct ApiDoc;

/// Registers the JWT bearer scheme referenced by protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /login"))
                        .build(),
                ),
            );
        }
    }
}
