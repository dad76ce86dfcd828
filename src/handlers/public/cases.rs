use axum::{
    extract::Query,
    response::Json,
};
use serde::Deserialize;

use crate::database::models::{DetailedCase, SimpleCase};
use crate::database::DatabaseManager;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DetailedCaseQuery {
    pub category: Option<String>,
}

/// GET /cases/simple - public gallery; inactive rows are never served
pub async fn list_simple() -> Result<Json<Vec<SimpleCase>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let cases: Vec<SimpleCase> = sqlx::query_as(
        "SELECT * FROM simple_cases
         WHERE is_active = true
         ORDER BY display_order ASC, created_at DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(cases))
}

/// GET /cases/detailed?category= - public gallery with optional category filter
pub async fn list_detailed(
    Query(query): Query<DetailedCaseQuery>,
) -> Result<Json<Vec<DetailedCase>>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let cases: Vec<DetailedCase> = match query.category {
        Some(category) => {
            sqlx::query_as(
                "SELECT * FROM detailed_cases
                 WHERE is_active = true AND category = $1
                 ORDER BY display_order ASC, created_at DESC",
            )
            .bind(category)
            .fetch_all(&pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT * FROM detailed_cases
                 WHERE is_active = true
                 ORDER BY display_order ASC, created_at DESC",
            )
            .fetch_all(&pool)
            .await?
        }
    };

    Ok(Json(cases))
}
