use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

/// Hash of the string "invalid-password-placeholder". Verified against when a
/// login hits an unknown email so that path costs the same as a real
/// verification and does not leak account existence through timing.
pub const DUMMY_HASH: &str = "$2b$12$5BFA6L1/Demv79F18DsV1uZvBw6/m2dAAK9J3svv8Rh0MPUBQ3IOq";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}
