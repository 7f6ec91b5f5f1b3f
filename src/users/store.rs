//! User persistence

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use thiserror::Error;
use tracing::{debug, error};

use super::models::{NewUser, ProfileUpdate, User};
use crate::common::safe_phone_log;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("phone number is already registered")]
    PhoneNumberTaken,

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::PhoneNumberTaken,
            _ => StoreError::Database(e),
        }
    }
}

/// Persistence operations the account service relies on
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user with a zero login counter and returns the assigned id
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError>;

    async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<User, StoreError>;

    async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError>;

    async fn check_phone_number_exists(&self, phone_number: &str) -> Result<bool, StoreError>;

    async fn increment_successful_logins(&self, id: i64) -> Result<(), StoreError>;

    async fn update_user_profile(&self, id: i64, update: &ProfileUpdate) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    db_pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }
}

const USER_COLUMNS: &str = "id, phone_number, full_name, password_hash, successful_logins";

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (phone_number, full_name, password_hash, successful_logins) VALUES (?, ?, ?, 0)",
        )
        .bind(&user.phone_number)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .execute(&self.db_pool)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                phone_number = %safe_phone_log(&user.phone_number),
                "Database error creating user"
            );
            StoreError::from(e)
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE phone_number = ?", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(phone_number)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn check_phone_number_exists(&self, phone_number: &str) -> Result<bool, StoreError> {
        let (exists,): (i64,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE phone_number = ?)")
                .bind(phone_number)
                .fetch_one(&self.db_pool)
                .await?;
        Ok(exists != 0)
    }

    async fn increment_successful_logins(&self, id: i64) -> Result<(), StoreError> {
        let result =
            sqlx::query("UPDATE users SET successful_logins = successful_logins + 1 WHERE id = ?")
                .bind(id)
                .execute(&self.db_pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn update_user_profile(&self, id: i64, update: &ProfileUpdate) -> Result<(), StoreError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
        {
            let mut assignments = builder.separated(", ");
            for field in update.fields() {
                assignments.push(field.column());
                assignments.push_unseparated(" = ");
                assignments.push_bind_unseparated(field.value().to_string());
            }
            assignments.push("updated_at = datetime('now')");
        }
        builder.push(" WHERE id = ").push_bind(id);

        debug!(user_id = id, sql = %builder.sql(), "Applying profile update");

        let result = builder.build().execute(&self.db_pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
