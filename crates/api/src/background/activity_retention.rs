//! Periodic cleanup of old activity logs.
//!
//! Deletes rows from `activity_logs` older than the configured retention
//! period. Runs on a fixed interval using `tokio::time::interval`.

use std::time::Duration;

use cellar_db::repositories::ActivityLogRepo;
use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the activity retention loop until `cancel` is triggered.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Activity retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Activity retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match ActivityLogRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Activity retention: purged old rows");
                        } else {
                            tracing::debug!("Activity retention: no rows to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Activity retention: cleanup failed");
                    }
                }
            }
        }
    }
}
