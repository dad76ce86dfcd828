use axum::{
    extract::{Extension, Path},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::is_valid_role;
use crate::database::models::admin::ROLE_ADMIN;
use crate::database::models::Admin;
use crate::database::{DatabaseManager, Patch};
use crate::error::ApiError;
use crate::extract::Json;
use crate::middleware::AuthUser;
use crate::services::{AdminError, AdminService};

/// GET /admin/admins - every admin row, newest first
pub async fn list() -> Result<Json<Vec<Admin>>, ApiError> {
    let service = AdminService::new().await?;
    let admins = service.list().await?;
    Ok(Json(admins))
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// POST /admin/admins - super_admin only (enforced by the route gate)
pub async fn create(
    Json(body): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Admin>), ApiError> {
    let (email, password) = match (body.email, body.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(ApiError::bad_request("Email and password required")),
    };

    let role = body.role.unwrap_or_else(|| ROLE_ADMIN.to_string());
    if !is_valid_role(&role) {
        return Err(ApiError::bad_request("Role must be admin or super_admin"));
    }

    let service = AdminService::new().await?;
    let admin = service
        .create_admin(&email, &password, &role)
        .await
        .map_err(|e| match e {
            AdminError::AlreadyExists => ApiError::bad_request("Admin already exists"),
            other => {
                tracing::error!("Create admin failed: {}", other);
                ApiError::internal("Failed to create admin")
            }
        })?;

    Ok((StatusCode::CREATED, Json(admin)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAdminRequest {
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// PATCH /admin/admins/:user_id - sparse update of role / is_active
pub async fn update(
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateAdminRequest>,
) -> Result<Json<Admin>, ApiError> {
    let mut patch = Patch::new();
    if let Some(role) = body.role {
        if !is_valid_role(&role) {
            return Err(ApiError::bad_request("Role must be admin or super_admin"));
        }
        patch.set("role", role);
    }
    if let Some(is_active) = body.is_active {
        patch.set("is_active", is_active);
    }

    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let pool = DatabaseManager::pool().await?;
    let admin: Option<Admin> = patch.fetch_updated(&pool, "admins", "user_id", user_id).await?;

    admin
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Admin not found"))
}

/// DELETE /admin/admins/:user_id - self-deletion is rejected before any
/// store access, regardless of role
pub async fn remove(
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if user_id == user.id {
        return Err(ApiError::bad_request("Cannot delete yourself"));
    }

    let service = AdminService::new().await?;
    if !service.delete(user_id).await? {
        return Err(ApiError::not_found("Admin not found"));
    }

    Ok(Json(json!({ "message": "Admin deleted successfully" })))
}
