use axum::{extract::Path, http::StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{DetailedCase, Feature, SimpleCase};
use crate::database::{DatabaseManager, Patch};
use crate::error::ApiError;
use crate::extract::Json;

// ---- simple cases ----

/// GET /cases/simple/all - back-office list, inactive rows included
pub async fn list_all_simple() -> Result<Json<Vec<SimpleCase>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let cases: Vec<SimpleCase> = sqlx::query_as(
        "SELECT * FROM simple_cases ORDER BY display_order ASC, created_at DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(cases))
}

#[derive(Debug, Deserialize)]
pub struct CreateSimpleCaseRequest {
    pub before_image_url: String,
    pub after_image_url: String,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

/// POST /cases/simple
pub async fn create_simple(
    Json(body): Json<CreateSimpleCaseRequest>,
) -> Result<(StatusCode, Json<SimpleCase>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let case: SimpleCase = sqlx::query_as(
        "INSERT INTO simple_cases (before_image_url, after_image_url, is_active, display_order)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(&body.before_image_url)
    .bind(&body.after_image_url)
    .bind(body.is_active.unwrap_or(true))
    .bind(body.display_order.unwrap_or(0))
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(case)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSimpleCaseRequest {
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

/// PATCH /cases/simple/:id
pub async fn update_simple(
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSimpleCaseRequest>,
) -> Result<Json<SimpleCase>, ApiError> {
    let mut patch = Patch::new();
    if let Some(url) = body.before_image_url {
        patch.set("before_image_url", url);
    }
    if let Some(url) = body.after_image_url {
        patch.set("after_image_url", url);
    }
    if let Some(is_active) = body.is_active {
        patch.set("is_active", is_active);
    }
    if let Some(display_order) = body.display_order {
        patch.set("display_order", display_order);
    }

    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let pool = DatabaseManager::pool().await?;
    let case: Option<SimpleCase> = patch.fetch_updated(&pool, "simple_cases", "id", id).await?;

    case.map(Json)
        .ok_or_else(|| ApiError::not_found("Simple case not found"))
}

/// DELETE /cases/simple/:id
pub async fn remove_simple(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM simple_cases WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Simple case not found"));
    }

    Ok(Json(json!({ "message": "Simple case deleted successfully" })))
}

// ---- detailed cases ----

/// GET /cases/detailed/all - back-office list, inactive rows included
pub async fn list_all_detailed() -> Result<Json<Vec<DetailedCase>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let cases: Vec<DetailedCase> = sqlx::query_as(
        "SELECT * FROM detailed_cases ORDER BY display_order ASC, created_at DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(cases))
}

#[derive(Debug, Deserialize)]
pub struct CreateDetailedCaseRequest {
    pub surgery_name: String,
    pub before_image_url: String,
    pub after_image_url: String,
    pub before_features: Option<Vec<Feature>>,
    pub after_features: Option<Vec<Feature>>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

/// POST /cases/detailed
pub async fn create_detailed(
    Json(body): Json<CreateDetailedCaseRequest>,
) -> Result<(StatusCode, Json<DetailedCase>), ApiError> {
    let before_features = features_json(body.before_features.unwrap_or_default())?;
    let after_features = features_json(body.after_features.unwrap_or_default())?;

    let pool = DatabaseManager::pool().await?;
    let case: DetailedCase = sqlx::query_as(
        "INSERT INTO detailed_cases
             (surgery_name, before_image_url, after_image_url, before_features,
              after_features, category, is_featured, is_active, display_order)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(&body.surgery_name)
    .bind(&body.before_image_url)
    .bind(&body.after_image_url)
    .bind(before_features)
    .bind(after_features)
    .bind(&body.category)
    .bind(body.is_featured.unwrap_or(false))
    .bind(body.is_active.unwrap_or(true))
    .bind(body.display_order.unwrap_or(0))
    .fetch_one(&pool)
    .await?;

    Ok((StatusCode::CREATED, Json(case)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDetailedCaseRequest {
    pub surgery_name: Option<String>,
    pub before_image_url: Option<String>,
    pub after_image_url: Option<String>,
    pub before_features: Option<Vec<Feature>>,
    pub after_features: Option<Vec<Feature>>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
    pub display_order: Option<i32>,
}

/// PATCH /cases/detailed/:id
pub async fn update_detailed(
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDetailedCaseRequest>,
) -> Result<Json<DetailedCase>, ApiError> {
    let mut patch = Patch::new();
    if let Some(name) = body.surgery_name {
        patch.set("surgery_name", name);
    }
    if let Some(url) = body.before_image_url {
        patch.set("before_image_url", url);
    }
    if let Some(url) = body.after_image_url {
        patch.set("after_image_url", url);
    }
    if let Some(features) = body.before_features {
        patch.set("before_features", features_json(features)?);
    }
    if let Some(features) = body.after_features {
        patch.set("after_features", features_json(features)?);
    }
    if let Some(category) = body.category {
        patch.set("category", category);
    }
    if let Some(is_featured) = body.is_featured {
        patch.set("is_featured", is_featured);
    }
    if let Some(is_active) = body.is_active {
        patch.set("is_active", is_active);
    }
    if let Some(display_order) = body.display_order {
        patch.set("display_order", display_order);
    }

    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let pool = DatabaseManager::pool().await?;
    let case: Option<DetailedCase> =
        patch.fetch_updated(&pool, "detailed_cases", "id", id).await?;

    case.map(Json)
        .ok_or_else(|| ApiError::not_found("Detailed case not found"))
}

/// DELETE /cases/detailed/:id
pub async fn remove_detailed(Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let result = sqlx::query("DELETE FROM detailed_cases WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Detailed case not found"));
    }

    Ok(Json(json!({ "message": "Detailed case deleted successfully" })))
}

fn features_json(features: Vec<Feature>) -> Result<Value, ApiError> {
    serde_json::to_value(features).map_err(|e| {
        tracing::error!("Feature list serialization failed: {}", e);
        ApiError::internal("An error occurred while processing your request")
    })
}
