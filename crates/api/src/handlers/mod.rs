pub mod bottles;
pub mod cellars;
pub mod reports;

use cellar_db::models::activity_log::CreateActivityLog;
use cellar_db::repositories::ActivityLogRepo;
use sqlx::PgPool;

/// Append an activity log entry without failing the request.
///
/// The catalog change has already been committed when this runs, so a
/// logging failure is reported but not surfaced to the client.
pub(crate) async fn record_activity(pool: &PgPool, entry: CreateActivityLog) {
    if let Err(e) = ActivityLogRepo::record(pool, &entry).await {
        tracing::warn!(
            error = %e,
            action = entry.action,
            entity_id = ?entry.entity_id,
            "Failed to record activity"
        );
    }
}
