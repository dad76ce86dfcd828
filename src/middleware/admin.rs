use axum::{extract::Request, middleware::Next, response::Response};

use crate::database::models::Admin;
use crate::database::DatabaseManager;
use crate::error::ApiError;

use super::auth::AuthUser;

/// The caller's admin row, attached once the admin gate has passed. Handlers
/// read the role from here rather than re-querying.
#[derive(Clone, Debug)]
pub struct CurrentAdmin(pub Admin);

/// Gate for back-office routes, layered after `require_auth`. Authentication
/// alone is not enough: the verified principal must also hold an active admin
/// row. A missing row and a deactivated row are the same failure, and both
/// are 403 (the token was valid) rather than the 401 of a missing token.
pub async fn require_admin(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Access token required"))?;

    let pool = DatabaseManager::pool().await?;
    let admin: Option<Admin> = sqlx::query_as(
        "SELECT user_id, email, role, is_active, created_at, updated_at
         FROM admins
         WHERE user_id = $1 AND is_active = true",
    )
    .bind(user.id)
    .fetch_optional(&pool)
    .await?;

    let admin = admin.ok_or_else(|| {
        tracing::warn!("Admin gate rejected user {} ({})", user.id, user.email);
        ApiError::forbidden("Admin access required")
    })?;

    request.extensions_mut().insert(CurrentAdmin(admin));
    Ok(next.run(request).await)
}

/// Narrower gate for admin-management routes, layered after `require_admin`:
/// the attached admin row must carry the super_admin role.
pub async fn require_super_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let admin = request
        .extensions()
        .get::<CurrentAdmin>()
        .ok_or_else(|| ApiError::unauthorized("Access token required"))?;

    if !admin.0.is_super_admin() {
        return Err(ApiError::forbidden("Super admin access required"));
    }

    Ok(next.run(request).await)
}
