use serde_json::{json, Value};

use crate::auth::{generate_jwt, verify_password, Claims};
use crate::config;
use crate::database::models::{Admin, User};
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::extract::Json;
use crate::handlers::public::auth::CredentialsRequest;

/// POST /admin/login - authenticate an admin and issue a bearer token.
///
/// Three distinct failures: missing fields (400), bad credentials (401), and
/// a valid user without an active admin row (403). The issued token embeds
/// the admin's role so super_admin checks read the claim the gate re-verified.
pub async fn login(Json(body): Json<CredentialsRequest>) -> Result<Json<Value>, ApiError> {
    let (email, password) = body.require()?;

    let pool = DatabaseManager::pool().await?;
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?;

    let user = user.ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;
    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let admin: Option<Admin> = sqlx::query_as(
        "SELECT user_id, email, role, is_active, created_at, updated_at
         FROM admins
         WHERE user_id = $1 AND is_active = true",
    )
    .bind(user.id)
    .fetch_optional(&pool)
    .await?;

    let admin = admin.ok_or_else(|| ApiError::forbidden("Admin access required"))?;

    let claims = Claims::new(user.id, user.email.clone(), admin.role.clone());
    let token = generate_jwt(&claims, &config::config().security.jwt_secret)?;

    Ok(Json(json!({
        "user": {
            "id": user.id,
            "email": user.email,
            "role": admin.role,
        },
        "token": token,
    })))
}
