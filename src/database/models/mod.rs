pub mod admin;
pub mod booking;
pub mod case_study;
pub mod user;

pub use admin::Admin;
pub use booking::{Booking, BookingServiceItem, BookingWithServices};
pub use case_study::{DetailedCase, Feature, SimpleCase};
pub use user::User;
