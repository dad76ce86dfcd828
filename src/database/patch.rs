use serde_json::Value;
use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

/// A sparse UPDATE: handlers record an assignment per field actually present
/// in the request body, and absent fields are never touched. Column names are
/// static strings supplied by the handler, never derived from request input,
/// so the generated SET clause cannot be injected into.
#[derive(Debug, Default)]
pub struct Patch {
    columns: Vec<&'static str>,
    values: Vec<PatchValue>,
}

#[derive(Debug, Clone)]
pub enum PatchValue {
    Text(String),
    NullableText(Option<String>),
    Bool(bool),
    Int(i32),
    Json(Value),
}

impl From<String> for PatchValue {
    fn from(v: String) -> Self {
        PatchValue::Text(v)
    }
}

impl From<&str> for PatchValue {
    fn from(v: &str) -> Self {
        PatchValue::Text(v.to_string())
    }
}

impl From<Option<String>> for PatchValue {
    fn from(v: Option<String>) -> Self {
        PatchValue::NullableText(v)
    }
}

impl From<bool> for PatchValue {
    fn from(v: bool) -> Self {
        PatchValue::Bool(v)
    }
}

impl From<i32> for PatchValue {
    fn from(v: i32) -> Self {
        PatchValue::Int(v)
    }
}

impl From<Value> for PatchValue {
    fn from(v: Value) -> Self {
        PatchValue::Json(v)
    }
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: &'static str, value: impl Into<PatchValue>) {
        self.columns.push(column);
        self.values.push(value.into());
    }

    /// True when no recognized field was supplied; callers reject the request
    /// with "No fields to update" before any statement is issued.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn sql(&self, table: &str, key_column: &str) -> String {
        let assignments: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("\"{}\" = ${}", column, i + 1))
            .collect();

        format!(
            "UPDATE \"{}\" SET {} WHERE \"{}\" = ${} RETURNING *",
            table,
            assignments.join(", "),
            key_column,
            self.columns.len() + 1
        )
    }

    /// Apply the patch to the row identified by `id`, returning the updated
    /// row or None when no row matched.
    pub async fn fetch_updated<T>(
        self,
        pool: &PgPool,
        table: &'static str,
        key_column: &'static str,
        id: Uuid,
    ) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = self.sql(table, key_column);
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in &self.values {
            query = match value {
                PatchValue::Text(s) => query.bind(s.clone()),
                PatchValue::NullableText(s) => query.bind(s.clone()),
                PatchValue::Bool(b) => query.bind(*b),
                PatchValue::Int(i) => query.bind(*i),
                PatchValue::Json(j) => query.bind(j.clone()),
            };
        }

        query.bind(id).fetch_optional(pool).await
    }
}
