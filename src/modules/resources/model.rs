//! Resource (asset) data models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::UserRole;
use crate::utils::patch::Patch;

/// Lifecycle status. Stored as the postgres enum `resource_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "resource_status")]
pub enum ResourceStatus {
    Active,
    Retired,
}

/// A registered asset. `reg_number` and `date_created` are assigned at create
/// and never change afterwards.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Resource {
    pub id: Uuid,
    pub reg_number: String,
    pub resource_type: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial_number: String,
    pub processor: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub operating_system: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: Option<String>,
    pub assigned_user_id: Option<Uuid>,
    pub warranty_provider: Option<String>,
    pub support_contact: Option<String>,
    pub comments: Option<String>,
    pub status: ResourceStatus,
    pub date_created: chrono::DateTime<chrono::Utc>,
}

/// A resource joined with its assignee's current name and role. Both are null
/// when the resource is unassigned or the assignee was since deleted.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct ResourceWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub resource: Resource,
    pub assigned_user_name: Option<String>,
    pub assigned_user_role: Option<UserRole>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateResourceDto {
    #[validate(length(min = 1))]
    pub resource_type: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    #[validate(length(min = 1))]
    pub serial_number: String,
    pub processor: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub operating_system: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub location: Option<String>,
    pub assigned_user_id: Option<Uuid>,
    pub warranty_provider: Option<String>,
    pub support_contact: Option<String>,
    pub comments: Option<String>,
    pub status: Option<ResourceStatus>,
}

/// DTO for updating a resource. Required columns (`resource_type`,
/// `serial_number`, `status`) use `Option` (absent = keep); nullable columns
/// use [`Patch`] so callers can clear them, including unassigning a resource
/// by sending `"assigned_user_id": null`.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateResourceDto {
    #[validate(length(min = 1))]
    pub resource_type: Option<String>,
    #[validate(length(min = 1))]
    pub serial_number: Option<String>,
    pub status: Option<ResourceStatus>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub manufacturer: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub model: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub processor: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub ram: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub storage: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub operating_system: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub purchase_date: Patch<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub warranty_expiry: Patch<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub location: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<Uuid>)]
    pub assigned_user_id: Patch<Uuid>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub warranty_provider: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub support_contact: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub comments: Patch<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TypeCount {
    pub resource_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceStatsResponse {
    pub total_resources: i64,
    pub active: i64,
    pub retired: i64,
    pub by_type: Vec<TypeCount>,
    pub recently_added: Vec<ResourceWithUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_uses_display_case() {
        assert_eq!(
            serde_json::to_string(&ResourceStatus::Active).unwrap(),
            r#""Active""#
        );
        let status: ResourceStatus = serde_json::from_str(r#""Retired""#).unwrap();
        assert_eq!(status, ResourceStatus::Retired);
    }

    #[test]
    fn test_update_dto_assignment_clearable() {
        let dto: UpdateResourceDto =
            serde_json::from_str(r#"{"assigned_user_id":null,"comments":"handed back"}"#).unwrap();
        assert_eq!(dto.assigned_user_id, Patch::Clear);
        assert_eq!(dto.comments, Patch::Set("handed back".to_string()));
        assert_eq!(dto.location, Patch::Keep);
        assert!(dto.resource_type.is_none());
    }

    #[test]
    fn test_create_dto_requires_type_and_serial() {
        let dto: CreateResourceDto = serde_json::from_str(
            r#"{"resource_type":"laptop","serial_number":"SN-001"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());

        let empty_type: CreateResourceDto =
            serde_json::from_str(r#"{"resource_type":"","serial_number":"SN-001"}"#).unwrap();
        assert!(empty_type.validate().is_err());
    }
}
