pub mod admins;
pub mod bookings;
pub mod cases;
pub mod login;
