use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /auth/me - echo the verified principal's identity
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "user": {
            "id": user.id,
            "email": user.email,
            "role": user.role,
        }
    }))
}
