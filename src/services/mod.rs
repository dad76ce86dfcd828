pub mod admin_service;
pub mod booking_service;

pub use admin_service::{AdminError, AdminService};
pub use booking_service::{BookingService, CreateBooking, ServiceLine};
