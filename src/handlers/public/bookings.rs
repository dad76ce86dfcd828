use axum::{extract::Extension, http::StatusCode};

use crate::database::models::Booking;
use crate::error::ApiError;
use crate::extract::Json;
use crate::middleware::AuthUser;
use crate::services::{BookingService, CreateBooking};

/// POST /bookings - submit a consultation request.
///
/// Public by design: a consultation request must not require registration.
/// When the request carries a valid token the booking is linked to that user,
/// otherwise user_id stays NULL. The booking row and its service line items
/// are written atomically; any failure rolls back the whole submission.
pub async fn create(
    user: Option<Extension<AuthUser>>,
    Json(body): Json<CreateBooking>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let user_id = user.map(|Extension(u)| u.id);

    let service = BookingService::new().await?;
    let booking = service.create(body, user_id).await.map_err(|e| {
        tracing::error!("Create booking failed: {}", e);
        ApiError::internal("Failed to create booking")
    })?;

    Ok((StatusCode::CREATED, Json(booking)))
}
