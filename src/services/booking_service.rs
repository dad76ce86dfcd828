use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::booking::PAYMENT_PAID;
use crate::database::models::{Booking, BookingServiceItem, BookingWithServices};

/// Requested service line in a booking submission. Prices arrive as JSON
/// strings or numbers; Decimal accepts both.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceLine {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
    pub consultation_fee: Option<Decimal>,
}

/// total = sum of line prices + consultation fee. Fixed at creation; an empty
/// service list yields a consultation-only booking priced at the fee alone.
pub fn total_amount(services: &[ServiceLine], consultation_fee: Decimal) -> Decimal {
    services.iter().map(|s| s.price).sum::<Decimal>() + consultation_fee
}

pub struct BookingService {
    pool: PgPool,
}

impl BookingService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Create the booking and all of its line items in one transaction.
    /// Any failed insert rolls back the whole attempt: the transaction handle
    /// commits only on the success path and rolls back when dropped early.
    pub async fn create(
        &self,
        request: CreateBooking,
        user_id: Option<Uuid>,
    ) -> Result<Booking, DatabaseError> {
        let consultation_fee = request.consultation_fee.unwrap_or_else(|| {
            Decimal::from(config::config().booking.default_consultation_fee)
        });
        let total = total_amount(&request.services, consultation_fee);

        let mut tx = self.pool.begin().await?;

        let booking: Booking = sqlx::query_as(
            "INSERT INTO bookings
                 (user_id, name, email, phone, service_type, preferred_date,
                  preferred_time, message, total_amount, consultation_fee)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.service_type)
        .bind(&request.preferred_date)
        .bind(&request.preferred_time)
        .bind(&request.message)
        .bind(total)
        .bind(consultation_fee)
        .fetch_one(&mut *tx)
        .await?;

        for service in &request.services {
            sqlx::query(
                "INSERT INTO booking_services (booking_id, service_name, service_price)
                 VALUES ($1, $2, $3)",
            )
            .bind(booking.id)
            .bind(&service.name)
            .bind(service.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(booking)
    }

    /// Bookings belonging to the caller: rows linked by user id, plus rows
    /// submitted anonymously under the same email before the caller signed up.
    pub async fn list_for(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<Vec<BookingWithServices>, DatabaseError> {
        let bookings: Vec<Booking> = sqlx::query_as(
            "SELECT * FROM bookings
             WHERE user_id = $1 OR email = $2
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        self.attach_services(bookings).await
    }

    pub async fn list_all(&self) -> Result<Vec<BookingWithServices>, DatabaseError> {
        let bookings: Vec<Booking> =
            sqlx::query_as("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        self.attach_services(bookings).await
    }

    /// Owner payment completion: marks the booking paid, recording the method
    /// when one is given. The ownership predicate mirrors `list_for`, so a
    /// booking the caller cannot see is also one it cannot pay for (None).
    pub async fn complete_payment(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        email: &str,
        payment_method: Option<String>,
    ) -> Result<Option<Booking>, DatabaseError> {
        let booking: Option<Booking> = sqlx::query_as(
            "UPDATE bookings
             SET payment_status = $1,
                 payment_method = COALESCE($2, payment_method)
             WHERE id = $3 AND (user_id = $4 OR email = $5)
             RETURNING *",
        )
        .bind(PAYMENT_PAID)
        .bind(payment_method)
        .bind(booking_id)
        .bind(user_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn delete(&self, booking_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Aggregate line items for a page of bookings in one query, preserving
    /// the bookings' order.
    async fn attach_services(
        &self,
        bookings: Vec<Booking>,
    ) -> Result<Vec<BookingWithServices>, DatabaseError> {
        if bookings.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = bookings.iter().map(|b| b.id).collect();
        let items: Vec<BookingServiceItem> = sqlx::query_as(
            "SELECT id, booking_id, service_name, service_price
             FROM booking_services
             WHERE booking_id = ANY($1)
             ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: std::collections::HashMap<Uuid, Vec<BookingServiceItem>> =
            std::collections::HashMap::new();
        for item in items {
            grouped.entry(item.booking_id).or_default().push(item);
        }

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let services = grouped.remove(&booking.id).unwrap_or_default();
                BookingWithServices { booking, services }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: &str) -> ServiceLine {
        ServiceLine {
            name: name.to_string(),
            price: price.parse().unwrap(),
        }
    }

    #[test]
    fn total_sums_prices_and_fee() {
        let services = vec![line("Facial Contour", "200"), line("Injection Lifting", "150")];
        let total = total_amount(&services, Decimal::from(500));
        assert_eq!(total, Decimal::from(850));
    }

    #[test]
    fn total_of_empty_services_is_fee_alone() {
        let total = total_amount(&[], Decimal::from(500));
        assert_eq!(total, Decimal::from(500));
    }

    #[test]
    fn fractional_prices_are_exact() {
        let services = vec![line("A", "19.99"), line("B", "0.01")];
        let total = total_amount(&services, Decimal::from(100));
        assert_eq!(total, "120.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn create_request_accepts_string_and_numeric_prices() {
        let body: CreateBooking = serde_json::from_value(serde_json::json!({
            "name": "Lin Wei",
            "email": "lin@example.com",
            "phone": "555-0100",
            "service_type": "facial-contour",
            "services": [
                {"name": "A", "price": "200"},
                {"name": "B", "price": 150}
            ]
        }))
        .unwrap();

        assert_eq!(body.services.len(), 2);
        assert_eq!(
            total_amount(&body.services, Decimal::from(500)),
            Decimal::from(850)
        );
        assert!(body.consultation_fee.is_none());
        assert!(body.preferred_date.is_none());
    }

    #[test]
    fn services_default_to_empty_when_absent() {
        let body: CreateBooking = serde_json::from_value(serde_json::json!({
            "name": "Lin Wei",
            "email": "lin@example.com",
            "phone": "555-0100",
            "service_type": "consultation"
        }))
        .unwrap();

        assert!(body.services.is_empty());
    }
}
