use axum::extract::{Extension, Path};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Booking, BookingWithServices};
use crate::error::ApiError;
use crate::extract::Json;
use crate::middleware::AuthUser;
use crate::services::BookingService;

/// GET /bookings - bookings belonging to the caller, newest first. Matching
/// by email as well as user id surfaces bookings made anonymously with the
/// same address before the caller registered.
pub async fn list_mine(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<BookingWithServices>>, ApiError> {
    let service = BookingService::new().await?;
    let bookings = service.list_for(user.id, &user.email).await?;
    Ok(Json(bookings))
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentRequest {
    pub payment_method: Option<String>,
}

/// POST /bookings/:id/payment - the booking owner marks the consultation fee
/// paid. A booking the caller does not own reads as not found.
pub async fn complete_payment(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    body: Option<Json<PaymentRequest>>,
) -> Result<Json<Booking>, ApiError> {
    let payment_method = body.and_then(|Json(b)| b.payment_method);

    let service = BookingService::new().await?;
    let booking = service
        .complete_payment(id, user.id, &user.email, payment_method)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    Ok(Json(booking))
}
