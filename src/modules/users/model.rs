//! User data models and DTOs.
//!
//! The [`User`] entity carries the identity fields plus the optional profile
//! fields an IT helpdesk keeps on file (contact numbers, office location,
//! emergency contact, national-ID numbers). The password column is never part
//! of [`User`]; credential lookups use a private row type in the auth service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::patch::Patch;

/// Role tier. Stored as the postgres enum `user_role`.
///
/// The three tiers form a strict order (`user < poweruser < admin`) used by
/// the hierarchy checks in [`crate::middleware::role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    PowerUser,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::PowerUser => "poweruser",
            UserRole::User => "user",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "poweruser" => Ok(UserRole::PowerUser),
            "user" => Ok(UserRole::User),
            _ => Err(()),
        }
    }
}

/// A registered user. `date_created` is set once at insert and never updated.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub designation: String,
    pub dob: Option<NaiveDate>,
    pub aadhar_number: Option<String>,
    pub pan_number: Option<String>,
    pub room_number: Option<String>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub country_code: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_country_code: Option<String>,
    pub employee_id: Option<String>,
    pub office_location: Option<String>,
    pub floor: Option<String>,
    pub desk_number: Option<String>,
    pub office_phone: Option<String>,
    pub date_created: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a new user. Admin only; the password arrives in cleartext
/// here and is hashed before it ever reaches storage.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: UserRole,
    #[validate(length(min = 1))]
    pub designation: String,
    pub dob: Option<NaiveDate>,
    pub aadhar_number: Option<String>,
    pub pan_number: Option<String>,
    pub room_number: Option<String>,
    pub phone_number: Option<String>,
    pub country_code: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_country_code: Option<String>,
    pub employee_id: Option<String>,
    pub office_location: Option<String>,
    pub floor: Option<String>,
    pub desk_number: Option<String>,
    pub office_phone: Option<String>,
}

/// DTO for updating a user. Identity fields (`name`, `email`, `role`,
/// `designation`) are admin-only and use `Option` (absent = keep, cannot be
/// cleared). Profile fields use [`Patch`] so a caller can distinguish
/// "leave alone" from "clear".
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(min = 1))]
    pub designation: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub dob: Patch<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub aadhar_number: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub pan_number: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub room_number: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub phone_number: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub country_code: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub emergency_contact_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub emergency_contact_relation: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub emergency_contact_phone: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub emergency_country_code: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub employee_id: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub office_location: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub floor: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub desk_number: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub office_phone: Patch<String>,
}

impl UpdateUserDto {
    /// Strip the admin-only fields, leaving the subset a user may change on
    /// their own profile: contact/profile fields and password.
    pub fn restricted_to_self_service(mut self) -> Self {
        self.name = None;
        self.email = None;
        self.role = None;
        self.designation = None;
        self
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchParams {
    pub q: String,
}

/// User counts per role tier, for the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoleCounts {
    pub admin: i64,
    pub poweruser: i64,
    pub user: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserStatsResponse {
    pub total_users: i64,
    pub user_counts: RoleCounts,
}
