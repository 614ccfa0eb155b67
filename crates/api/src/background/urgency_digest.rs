//! Scheduled urgency digest.
//!
//! Ranks the cellar for the current year on a fixed interval and sums up
//! the past week: bottles added and consumed, and how full each cellar is.
//! The digest is logged and recorded in the activity log. Delivering it to
//! users is left to other services.

use std::time::Duration;

use cellar_core::occupancy::{compute_occupancy, OccupancyReport};
use cellar_core::ranking::{rank_by_urgency, RankedBottle, TierCounts};
use cellar_core::types::{year_of, Timestamp, Year};
use cellar_db::models::activity_log::{actions, CreateActivityLog};
use cellar_db::repositories::{ActivityLogRepo, BottleRepo, CellarRepo};
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Length of the activity window covered by each digest.
pub const ACTIVITY_PERIOD_DAYS: i64 = 7;

/// Bottle movements over the digest period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DigestActivity {
    pub period_days: i64,
    pub entries: i64,
    pub consumptions: i64,
    pub net_change: i64,
}

/// Result of one digest run, stored as the activity log details.
#[derive(Debug, Serialize)]
pub struct UrgencyDigest {
    pub year: Year,
    pub tier_counts: TierCounts,
    pub top: Vec<RankedBottle>,
    pub activity: DigestActivity,
    pub occupancy: OccupancyReport,
}

/// Run the digest loop until `cancel` is triggered.
///
/// The first digest is produced right after startup.
pub async fn run(pool: PgPool, period: Duration, top_n: usize, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = period.as_secs(),
        top_n,
        "Urgency digest job started"
    );

    let mut interval = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Urgency digest job stopping");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = run_once(&pool, Utc::now(), top_n).await {
                    tracing::error!(error = %e, "Urgency digest: run failed");
                }
            }
        }
    }
}

/// Build and record one digest as of `now`.
pub async fn run_once(
    pool: &PgPool,
    now: Timestamp,
    top_n: usize,
) -> Result<UrgencyDigest, sqlx::Error> {
    let year = year_of(now);
    let bottles = BottleRepo::list_active_snapshots(pool).await?;
    let cellars = CellarRepo::list_snapshots(pool).await?;
    let counts =
        BottleRepo::activity_since(pool, now - chrono::Duration::days(ACTIVITY_PERIOD_DAYS))
            .await?;

    let ranking = rank_by_urgency(&bottles, year);
    let digest = UrgencyDigest {
        year,
        tier_counts: ranking.tier_counts(),
        top: ranking.top(top_n),
        activity: DigestActivity {
            period_days: ACTIVITY_PERIOD_DAYS,
            entries: counts.entries,
            consumptions: counts.consumptions,
            net_change: counts.net_change(),
        },
        occupancy: compute_occupancy(&cellars, &bottles),
    };

    tracing::info!(
        year,
        critical = digest.tier_counts.critical,
        high = digest.tier_counts.high,
        medium = digest.tier_counts.medium,
        low = digest.tier_counts.low,
        entries = digest.activity.entries,
        consumptions = digest.activity.consumptions,
        total_bottles = digest.occupancy.total_bottles,
        "Urgency digest"
    );
    for entry in &digest.top {
        tracing::info!(
            bottle_id = entry.bottle_id,
            score = entry.score,
            tier = entry.tier.as_str(),
            "Urgency digest: drink soon"
        );
    }

    let details = match serde_json::to_value(&digest) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "Urgency digest: details not serializable, recording without them");
            None
        }
    };

    ActivityLogRepo::record(
        pool,
        &CreateActivityLog {
            action: actions::URGENCY_DIGEST,
            entity_type: None,
            entity_id: None,
            details,
        },
    )
    .await?;

    Ok(digest)
}
