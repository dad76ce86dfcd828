use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

pub const PAYMENT_UNPAID: &str = "unpaid";
pub const PAYMENT_PAID: &str = "paid";

pub fn is_valid_status(status: &str) -> bool {
    matches!(
        status,
        STATUS_PENDING | STATUS_CONFIRMED | STATUS_COMPLETED | STATUS_CANCELLED
    )
}

pub fn is_valid_payment_status(payment_status: &str) -> bool {
    matches!(payment_status, PAYMENT_UNPAID | PAYMENT_PAID)
}

/// One consultation request. user_id is NULL for anonymous submissions;
/// total_amount is fixed at creation and never recomputed from line items.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    // Advisory scheduling preferences, free-form text
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    pub total_amount: Decimal,
    pub consultation_fee: Decimal,
    pub status: String,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Requested service line item, written atomically with its parent booking
/// and immutable afterwards; removed only by cascade when the booking goes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingServiceItem {
    pub id: i64,
    pub booking_id: Uuid,
    pub service_name: String,
    pub service_price: Decimal,
}

/// Read shape for booking lists: the row plus its aggregated line items.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithServices {
    #[serde(flatten)]
    pub booking: Booking,
    pub services: Vec<BookingServiceItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_domain() {
        assert!(is_valid_status("pending"));
        assert!(is_valid_status("confirmed"));
        assert!(is_valid_status("completed"));
        assert!(is_valid_status("cancelled"));
        assert!(!is_valid_status("archived"));
    }

    #[test]
    fn payment_status_domain() {
        assert!(is_valid_payment_status("unpaid"));
        assert!(is_valid_payment_status("paid"));
        assert!(!is_valid_payment_status("refunded"));
    }
}
