use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Before/after image pair for the public gallery. Only is_active rows are
/// served publicly, ordered by (display_order asc, created_at desc).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SimpleCase {
    pub id: Uuid,
    pub before_image_url: String,
    pub after_image_url: String,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// One bullet in a detailed case's before/after feature lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub feature: String,
}

/// Named procedure with feature bullets; same visibility rule as SimpleCase.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DetailedCase {
    pub id: Uuid,
    pub surgery_name: String,
    pub before_image_url: String,
    pub after_image_url: String,
    pub before_features: Json<Vec<Feature>>,
    pub after_features: Json<Vec<Feature>>,
    pub category: Option<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}
