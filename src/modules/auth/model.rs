use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::{User, UserRole};

#[derive(Deserialize, Debug, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct LoginResponse {
    pub user: User,
}

/// What the session cookies claim about the caller. No storage round trip, so
/// a `name` or `role` edited after login shows the value from login time.
#[derive(Serialize, Debug, ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
}
