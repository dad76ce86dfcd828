use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, hash_password, verify_password, Claims, ROLE_USER};
use crate::config;
use crate::database::manager::is_unique_violation;
use crate::database::models::User;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::extract::Json;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    pub fn require(self) -> Result<(String, String), ApiError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(ApiError::bad_request("Email and password required")),
        }
    }
}

fn session_body(user_id: uuid::Uuid, email: &str, role: &str) -> Result<Json<Value>, ApiError> {
    let claims = Claims::new(user_id, email.to_string(), role.to_string());
    let token = generate_jwt(&claims, &config::config().security.jwt_secret)?;

    Ok(Json(json!({
        "user": {
            "id": user_id,
            "email": email,
            "role": role,
        },
        "token": token,
    })))
}

/// POST /auth/register - create a user account and sign it in
pub async fn register(
    Json(body): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (email, password) = body.require()?;

    let pool = DatabaseManager::pool().await?;
    let password_hash = hash_password(&password)?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::bad_request("Email already registered")
        } else {
            e.into()
        }
    })?;

    let body = session_body(user.id, &user.email, ROLE_USER)?;
    Ok((StatusCode::CREATED, body))
}

/// POST /auth/login - authenticate a registered user
pub async fn login(Json(body): Json<CredentialsRequest>) -> Result<Json<Value>, ApiError> {
    let (email, password) = body.require()?;

    let pool = DatabaseManager::pool().await?;
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?;

    // Unknown email and wrong password are indistinguishable to the caller
    let user = user.ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;
    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    session_body(user.id, &user.email, ROLE_USER)
}

/// POST /auth/logout - tokens are stateless, so this only acknowledges;
/// clients discard the token.
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out successfully" }))
}
