use axum::extract::Path;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::booking::{is_valid_payment_status, is_valid_status};
use crate::database::models::{Booking, BookingWithServices};
use crate::database::{DatabaseManager, Patch};
use crate::error::ApiError;
use crate::extract::Json;
use crate::services::BookingService;

/// GET /bookings/all - every booking with its line items, newest first.
/// Unpaginated by design; the back office loads the full set.
pub async fn list_all() -> Result<Json<Vec<BookingWithServices>>, ApiError> {
    let service = BookingService::new().await?;
    let bookings = service.list_all().await?;
    Ok(Json(bookings))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
}

/// PATCH /bookings/:id - sparse update of the lifecycle fields. Values are
/// checked against their domains, but transition order is not: the status
/// machine is advisory and any value may follow any other.
pub async fn update(
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let mut patch = Patch::new();
    if let Some(status) = body.status {
        if !is_valid_status(&status) {
            return Err(ApiError::bad_request("Invalid status"));
        }
        patch.set("status", status);
    }
    if let Some(payment_status) = body.payment_status {
        if !is_valid_payment_status(&payment_status) {
            return Err(ApiError::bad_request("Invalid payment status"));
        }
        patch.set("payment_status", payment_status);
    }
    if let Some(payment_method) = body.payment_method {
        patch.set("payment_method", payment_method);
    }

    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let pool = DatabaseManager::pool().await?;
    let booking: Option<Booking> = patch.fetch_updated(&pool, "bookings", "id", id).await?;

    booking
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Booking not found"))
}

/// DELETE /bookings/:id - hard delete; line items cascade with the row
pub async fn remove(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let service = BookingService::new().await?;
    if !service.delete(id).await? {
        return Err(ApiError::not_found("Booking not found"));
    }

    Ok(Json(json!({ "message": "Booking deleted successfully" })))
}
