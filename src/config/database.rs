//! PostgreSQL connection pool initialization.
//!
//! The connection string comes from `DATABASE_URL`. The pool is created once
//! at startup and handed to [`crate::state::AppState`]; nothing opens a
//! connection lazily on first access.

use sqlx::PgPool;
use std::env;

/// Connect to the database and run pending migrations.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset, the connection fails, or a migration
/// cannot be applied. All three are unrecoverable at startup.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
