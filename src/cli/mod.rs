//! Admin provisioning.
//!
//! Admin accounts are never created through the API. They come from either
//! the startup seed (first boot of a fresh database) or the explicit
//! `seed-admin` command.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::modules::users::model::UserRole;
use crate::utils::password::hash_password;

const DEFAULT_ADMIN_NAME: &str = "System Administrator";
const DEFAULT_ADMIN_EMAIL: &str = "admin@assetdesk.local";
const DEFAULT_ADMIN_PASSWORD: &str = "changeme-admin";

/// Insert an admin account. A duplicate email is reported, not overwritten.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (name, email, password, role, designation)
         VALUES ($1, $2, $3, $4, 'Administrator')
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(UserRole::Admin)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}

/// Startup seed: create the default admin iff no admin-role account exists.
///
/// The check is by role, not email, so renaming or re-mailing the original
/// admin does not cause a second one to appear on the next boot.
pub async fn seed_admin_if_missing(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let admin_exists: (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE role = 'admin')")
            .fetch_one(db)
            .await?;

    if admin_exists.0 {
        return Ok(());
    }

    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| DEFAULT_ADMIN_NAME.to_string());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        warn!("ADMIN_PASSWORD not set, seeding default admin with the dev fallback password");
        DEFAULT_ADMIN_PASSWORD.to_string()
    });

    create_admin(db, &name, &email, &password).await?;
    info!(email = %email, "Seeded default admin account");

    Ok(())
}
