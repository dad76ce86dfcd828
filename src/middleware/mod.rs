pub mod admin;
pub mod auth;

pub use admin::{require_admin, require_super_admin, CurrentAdmin};
pub use auth::{optional_auth, require_auth, AuthUser};
