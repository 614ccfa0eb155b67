//! Repository for the `activity_logs` table.

use cellar_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, action, entity_type, entity_id, details, created_at, updated_at";

/// Provides append and retention operations for activity logs.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append an activity entry.
    pub async fn record(pool: &PgPool, input: &CreateActivityLog) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (action, entity_type, entity_id, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.action)
            .bind(input.entity_type)
            .bind(input.entity_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Most recent entries for one entity, newest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// Delete entries created before `cutoff`. Returns the number removed.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activity_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
