//! Shared utilities.
//!
//! - [`errors`]: application error type and storage-error classification
//! - [`password`]: bcrypt hashing and verification
//! - [`patch`]: explicit field patches for sparse-merge updates

pub mod errors;
pub mod password;
pub mod patch;
