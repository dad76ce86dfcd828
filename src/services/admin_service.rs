use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::database::manager::{is_unique_violation, DatabaseError, DatabaseManager};
use crate::database::models::Admin;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Admin already exists")]
    AlreadyExists,

    #[error("password hashing error: {0}")]
    Password(#[from] crate::auth::AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub async fn list(&self) -> Result<Vec<Admin>, DatabaseError> {
        let admins: Vec<Admin> = sqlx::query_as(
            "SELECT user_id, email, role, is_active, created_at, updated_at
             FROM admins
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(admins)
    }

    /// Grant admin rights to an email address. Reuses an existing user row or
    /// creates one (hashing the supplied password) first, then inserts the
    /// admin row; both writes share one transaction. A user that already
    /// holds an admin row surfaces as AlreadyExists.
    pub async fn create_admin(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Admin, AdminError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?;

        let user_id = match existing {
            Some((id,)) => id,
            None => {
                let password_hash = hash_password(password)?;
                let (id,): (Uuid,) = sqlx::query_as(
                    "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
                )
                .bind(email)
                .bind(&password_hash)
                .fetch_one(&mut *tx)
                .await?;
                id
            }
        };

        let admin: Admin = sqlx::query_as(
            "INSERT INTO admins (user_id, email, role)
             VALUES ($1, $2, $3)
             RETURNING user_id, email, role, is_active, created_at, updated_at",
        )
        .bind(user_id)
        .bind(email)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AdminError::AlreadyExists
            } else {
                AdminError::Sqlx(e)
            }
        })?;

        tx.commit().await?;
        Ok(admin)
    }

    /// Operator bootstrap variant: like `create_admin`, but an existing admin
    /// row is updated in place (role set, reactivated) instead of failing, so
    /// the CLI can be re-run safely.
    pub async fn bootstrap_admin(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Admin, AdminError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *tx)
            .await?;

        let user_id = match existing {
            Some((id,)) => id,
            None => {
                let password_hash = hash_password(password)?;
                let (id,): (Uuid,) = sqlx::query_as(
                    "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
                )
                .bind(email)
                .bind(&password_hash)
                .fetch_one(&mut *tx)
                .await?;
                id
            }
        };

        let admin: Admin = sqlx::query_as(
            "INSERT INTO admins (user_id, email, role)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id)
             DO UPDATE SET role = EXCLUDED.role, is_active = true
             RETURNING user_id, email, role, is_active, created_at, updated_at",
        )
        .bind(user_id)
        .bind(email)
        .bind(role)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(admin)
    }

    /// Removes the admin capability only; the user row survives.
    pub async fn delete(&self, user_id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM admins WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
