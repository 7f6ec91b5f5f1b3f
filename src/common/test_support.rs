// Shared fixtures for tests

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::migrations::run_migrations;
use crate::accounts::AccountService;
use crate::auth::password::PasswordService;
use crate::auth::token::TokenService;
use crate::users::{SqliteUserStore, UserStore};

pub const TEST_SECRET: &[u8] = b"test_secret_key";

/// Migrated in-memory database. One connection, since every SQLite
/// `:memory:` connection is its own database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool, false).await.unwrap();
    pool
}

/// Argon2 with a small work factor so tests stay fast
pub fn fast_passwords() -> PasswordService {
    PasswordService::with_cost(1024, 1, 1).unwrap()
}

pub fn service_with_store(store: Arc<dyn UserStore>) -> AccountService {
    AccountService::new(store, fast_passwords(), TokenService::new(TEST_SECRET))
}

pub async fn sqlite_service() -> AccountService {
    service_with_store(Arc::new(SqliteUserStore::new(memory_pool().await)))
}
