use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    CreateResourceDto, Resource, ResourceStatsResponse, ResourceStatus, ResourceWithUser,
    TypeCount, UpdateResourceDto,
};

const RESOURCE_COLUMNS: &str = "id, reg_number, resource_type, manufacturer, model, \
     serial_number, processor, ram, storage, operating_system, purchase_date, warranty_expiry, \
     location, assigned_user_id, warranty_provider, support_contact, comments, status, \
     date_created";

/// Resource columns plus the assignee's current name and role.
const JOINED_COLUMNS: &str = "r.id, r.reg_number, r.resource_type, r.manufacturer, r.model, \
     r.serial_number, r.processor, r.ram, r.storage, r.operating_system, r.purchase_date, \
     r.warranty_expiry, r.location, r.assigned_user_id, r.warranty_provider, r.support_contact, \
     r.comments, r.status, r.date_created, u.name AS assigned_user_name, \
     u.role AS assigned_user_role";

const REG_NUMBER_ATTEMPTS: usize = 5;

/// Registration number for a new asset: uppercased type, today's date and a
/// random three-digit suffix, e.g. `LAPTOP-REG-20250815-042`.
fn generate_reg_number(resource_type: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!(
        "{}-REG-{}-{:03}",
        resource_type.to_uppercase(),
        Utc::now().format("%Y%m%d"),
        suffix
    )
}

fn map_write_error(err: sqlx::Error) -> AppError {
    if AppError::is_foreign_key_violation(&err) {
        AppError::bad_request(anyhow::anyhow!("Assigned user does not exist"))
    } else {
        AppError::storage(err)
    }
}

pub struct ResourceService;

impl ResourceService {
    pub async fn list(db: &PgPool) -> Result<Vec<ResourceWithUser>, AppError> {
        let resources = sqlx::query_as::<_, ResourceWithUser>(&format!(
            "SELECT {JOINED_COLUMNS} FROM resources r
             LEFT JOIN users u ON r.assigned_user_id = u.id
             ORDER BY r.date_created DESC"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(resources)
    }

    pub async fn get(db: &PgPool, id: Uuid) -> Result<ResourceWithUser, AppError> {
        let resource = sqlx::query_as::<_, ResourceWithUser>(&format!(
            "SELECT {JOINED_COLUMNS} FROM resources r
             LEFT JOIN users u ON r.assigned_user_id = u.id
             WHERE r.id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::storage)?
        .ok_or_else(|| AppError::not_found(format!("Resource with id {} not found", id)))?;

        Ok(resource)
    }

    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<ResourceWithUser>, AppError> {
        let resources = sqlx::query_as::<_, ResourceWithUser>(&format!(
            "SELECT {JOINED_COLUMNS} FROM resources r
             LEFT JOIN users u ON r.assigned_user_id = u.id
             WHERE r.assigned_user_id = $1
             ORDER BY r.date_created DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(resources)
    }

    pub async fn search(db: &PgPool, query: &str) -> Result<Vec<ResourceWithUser>, AppError> {
        let pattern = format!("%{}%", query);
        let resources = sqlx::query_as::<_, ResourceWithUser>(&format!(
            "SELECT {JOINED_COLUMNS} FROM resources r
             LEFT JOIN users u ON r.assigned_user_id = u.id
             WHERE r.reg_number ILIKE $1
                OR r.resource_type ILIKE $1
                OR r.manufacturer ILIKE $1
                OR r.model ILIKE $1
                OR r.serial_number ILIKE $1
                OR r.location ILIKE $1
                OR u.name ILIKE $1
             ORDER BY r.date_created DESC"
        ))
        .bind(&pattern)
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(resources)
    }

    pub async fn stats(db: &PgPool) -> Result<ResourceStatsResponse, AppError> {
        let (total_resources, active, retired): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'Active'),
                    COUNT(*) FILTER (WHERE status = 'Retired')
             FROM resources",
        )
        .fetch_one(db)
        .await
        .map_err(AppError::storage)?;

        let by_type = sqlx::query_as::<_, TypeCount>(
            "SELECT resource_type, COUNT(*) AS count
             FROM resources
             GROUP BY resource_type
             ORDER BY count DESC, resource_type",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        let recently_added = sqlx::query_as::<_, ResourceWithUser>(&format!(
            "SELECT {JOINED_COLUMNS} FROM resources r
             LEFT JOIN users u ON r.assigned_user_id = u.id
             ORDER BY r.date_created DESC
             LIMIT 5"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(ResourceStatsResponse {
            total_resources,
            active,
            retired,
            by_type,
            recently_added,
        })
    }

    /// Insert a new resource, generating its registration number. A collision
    /// on the unique `reg_number` column regenerates the suffix and retries;
    /// any other failure surfaces immediately.
    pub async fn create(db: &PgPool, dto: CreateResourceDto) -> Result<Resource, AppError> {
        let status = dto.status.unwrap_or(ResourceStatus::Active);

        let mut last_err = None;
        for _ in 0..REG_NUMBER_ATTEMPTS {
            let reg_number = generate_reg_number(&dto.resource_type);

            let result = sqlx::query_as::<_, Resource>(&format!(
                "INSERT INTO resources (
                    reg_number, resource_type, manufacturer, model, serial_number, processor,
                    ram, storage, operating_system, purchase_date, warranty_expiry, location,
                    assigned_user_id, warranty_provider, support_contact, comments, status
                 )
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                         $17)
                 RETURNING {RESOURCE_COLUMNS}"
            ))
            .bind(&reg_number)
            .bind(&dto.resource_type)
            .bind(&dto.manufacturer)
            .bind(&dto.model)
            .bind(&dto.serial_number)
            .bind(&dto.processor)
            .bind(&dto.ram)
            .bind(&dto.storage)
            .bind(&dto.operating_system)
            .bind(dto.purchase_date)
            .bind(dto.warranty_expiry)
            .bind(&dto.location)
            .bind(dto.assigned_user_id)
            .bind(&dto.warranty_provider)
            .bind(&dto.support_contact)
            .bind(&dto.comments)
            .bind(status)
            .fetch_one(db)
            .await;

            match result {
                Ok(resource) => return Ok(resource),
                Err(err) if AppError::is_unique_violation(&err) => {
                    last_err = Some(err);
                }
                Err(err) => return Err(map_write_error(err)),
            }
        }

        Err(AppError::conflict(format!(
            "Could not allocate a unique registration number after {} attempts: {}",
            REG_NUMBER_ATTEMPTS,
            last_err.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    /// Sparse-merge update. `reg_number` and `date_created` are never in the
    /// SET list; an omitted field keeps its stored value byte-for-byte.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateResourceDto,
    ) -> Result<Resource, AppError> {
        let resource = sqlx::query_as::<_, Resource>(&format!(
            "UPDATE resources SET
                resource_type = CASE WHEN $2 THEN $3 ELSE resource_type END,
                serial_number = CASE WHEN $4 THEN $5 ELSE serial_number END,
                status = CASE WHEN $6 THEN $7 ELSE status END,
                manufacturer = CASE WHEN $8 THEN $9 ELSE manufacturer END,
                model = CASE WHEN $10 THEN $11 ELSE model END,
                processor = CASE WHEN $12 THEN $13 ELSE processor END,
                ram = CASE WHEN $14 THEN $15 ELSE ram END,
                storage = CASE WHEN $16 THEN $17 ELSE storage END,
                operating_system = CASE WHEN $18 THEN $19 ELSE operating_system END,
                purchase_date = CASE WHEN $20 THEN $21 ELSE purchase_date END,
                warranty_expiry = CASE WHEN $22 THEN $23 ELSE warranty_expiry END,
                location = CASE WHEN $24 THEN $25 ELSE location END,
                assigned_user_id = CASE WHEN $26 THEN $27 ELSE assigned_user_id END,
                warranty_provider = CASE WHEN $28 THEN $29 ELSE warranty_provider END,
                support_contact = CASE WHEN $30 THEN $31 ELSE support_contact END,
                comments = CASE WHEN $32 THEN $33 ELSE comments END
             WHERE id = $1
             RETURNING {RESOURCE_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.resource_type.is_some())
        .bind(&dto.resource_type)
        .bind(dto.serial_number.is_some())
        .bind(&dto.serial_number)
        .bind(dto.status.is_some())
        .bind(dto.status)
        .bind(dto.manufacturer.is_write())
        .bind(dto.manufacturer.write_value())
        .bind(dto.model.is_write())
        .bind(dto.model.write_value())
        .bind(dto.processor.is_write())
        .bind(dto.processor.write_value())
        .bind(dto.ram.is_write())
        .bind(dto.ram.write_value())
        .bind(dto.storage.is_write())
        .bind(dto.storage.write_value())
        .bind(dto.operating_system.is_write())
        .bind(dto.operating_system.write_value())
        .bind(dto.purchase_date.is_write())
        .bind(dto.purchase_date.write_value())
        .bind(dto.warranty_expiry.is_write())
        .bind(dto.warranty_expiry.write_value())
        .bind(dto.location.is_write())
        .bind(dto.location.write_value())
        .bind(dto.assigned_user_id.is_write())
        .bind(dto.assigned_user_id.write_value())
        .bind(dto.warranty_provider.is_write())
        .bind(dto.warranty_provider.write_value())
        .bind(dto.support_contact.is_write())
        .bind(dto.support_contact.write_value())
        .bind(dto.comments.is_write())
        .bind(dto.comments.write_value())
        .fetch_optional(db)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::not_found(format!("Resource with id {} not found", id)))?;

        Ok(resource)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::storage)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Resource with id {} not found",
                id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reg_number_format() {
        let reg = generate_reg_number("laptop");
        let parts: Vec<&str> = reg.split('-').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "LAPTOP");
        assert_eq!(parts[1], "REG");
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[3].len(), 3);
        assert!(parts[3].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_reg_number_uppercases_type() {
        let reg = generate_reg_number("Monitor");
        assert!(reg.starts_with("MONITOR-REG-"));
    }
}
