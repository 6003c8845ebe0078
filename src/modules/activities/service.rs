use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{Activity, NewActivity};

const ACTIVITY_COLUMNS: &str = "a.id, a.action, a.entity_type, a.entity_id, a.details, \
     a.performed_by, a.date_performed, u.name AS user_name";

pub struct ActivityService;

impl ActivityService {
    /// Append one audit row with a server-assigned timestamp.
    ///
    /// This does not re-check that the actor was allowed to perform the
    /// action — it runs after the mutation it describes.
    pub async fn record(db: &PgPool, activity: NewActivity) -> Result<Uuid, AppError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO activity_log (action, entity_type, entity_id, details, performed_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(activity.action)
        .bind(activity.entity_type)
        .bind(activity.entity_id)
        .bind(&activity.details)
        .bind(activity.performed_by)
        .fetch_one(db)
        .await
        .map_err(AppError::storage)?;

        Ok(id)
    }

    /// Best-effort append: the mutation this describes has already committed,
    /// so a failed audit write is logged and swallowed, never propagated.
    pub async fn record_best_effort(db: &PgPool, activity: NewActivity) {
        if let Err(e) = Self::record(db, activity.clone()).await {
            tracing::error!(
                action = activity.action,
                entity_type = activity.entity_type,
                entity_id = %activity.entity_id,
                error = %e.error,
                "Failed to record activity; mutation is not rolled back"
            );
        }
    }

    pub async fn recent(db: &PgPool, limit: i64) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS}
             FROM activity_log a
             LEFT JOIN users u ON a.performed_by = u.id
             ORDER BY a.date_performed DESC
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(activities)
    }

    pub async fn by_entity(
        db: &PgPool,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS}
             FROM activity_log a
             LEFT JOIN users u ON a.performed_by = u.id
             WHERE a.entity_type = $1 AND a.entity_id = $2
             ORDER BY a.date_performed DESC"
        ))
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(activities)
    }

    pub async fn by_actor(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS}
             FROM activity_log a
             LEFT JOIN users u ON a.performed_by = u.id
             WHERE a.performed_by = $1
             ORDER BY a.date_performed DESC
             LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::storage)?;

        Ok(activities)
    }
}
