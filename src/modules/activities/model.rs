use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Action verbs recorded in the audit trail.
pub mod actions {
    pub const CREATED: &str = "Created";
    pub const UPDATED: &str = "Updated";
    pub const DELETED: &str = "Deleted";
    pub const LOGIN: &str = "Login";
    pub const LOGOUT: &str = "Logout";
}

/// Entity type discriminators.
pub mod entities {
    pub const USER: &str = "user";
    pub const RESOURCE: &str = "resource";
}

/// One audit entry, joined with the actor's *current* display name.
///
/// Immutable once written; `performed_by` is null only after the actor's
/// account has been deleted (the row itself survives).
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
pub struct Activity {
    pub id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub details: Option<String>,
    pub performed_by: Option<Uuid>,
    pub date_performed: DateTime<Utc>,
    pub user_name: Option<String>,
}

/// Input for one audit append. The actor id must reference a real user at
/// write time; by the time this exists, authorization has already happened.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub action: &'static str,
    pub entity_type: &'static str,
    pub entity_id: Uuid,
    pub details: Option<String>,
    pub performed_by: Uuid,
}

/// Query parameters for audit listings.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ActivityListParams {
    pub limit: Option<i64>,
}
