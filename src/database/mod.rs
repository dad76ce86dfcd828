pub mod manager;
pub mod models;
pub mod patch;

pub use manager::{is_unique_violation, DatabaseError, DatabaseManager};
pub use patch::Patch;
