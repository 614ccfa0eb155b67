//! Repository for the `bottles` table.

use cellar_core::bottle::BottleSnapshot;
use cellar_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::bottle::{
    Bottle, BottleActivityCounts, BottleSnapshotRow, CreateBottle, UpdateBottle,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, vintage, cellar_id, floor_level, consumed_at, created_at, updated_at";

/// Snapshot query: every bottle with its insight contents in creation order.
/// Callers append a `WHERE` clause on `b` before the grouping.
const SNAPSHOT_SELECT: &str = "SELECT b.id, b.vintage, b.cellar_id, b.floor_level, \
        (b.consumed_at IS NOT NULL) AS consumed, \
        COALESCE( \
            array_agg(i.content ORDER BY i.created_at, i.id) FILTER (WHERE i.id IS NOT NULL), \
            '{}' \
        ) AS commentary \
     FROM bottles b \
     LEFT JOIN bottle_insights i ON i.bottle_id = b.id";

/// Provides CRUD and lifecycle operations for bottles.
pub struct BottleRepo;

impl BottleRepo {
    /// Insert a new bottle, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBottle) -> Result<Bottle, sqlx::Error> {
        let query = format!(
            "INSERT INTO bottles (name, vintage, cellar_id, floor_level)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(input.name.trim())
            .bind(input.vintage)
            .bind(input.cellar_id)
            .bind(input.floor_level)
            .fetch_one(pool)
            .await
    }

    /// Find a bottle by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bottle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bottles WHERE id = $1");
        sqlx::query_as::<_, Bottle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bottles in catalog order (oldest entry first).
    ///
    /// Consumed bottles are skipped unless `include_consumed` is set.
    pub async fn list(
        pool: &PgPool,
        include_consumed: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Bottle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bottles
             WHERE ($1 OR consumed_at IS NULL)
             ORDER BY id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(include_consumed)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a bottle. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBottle,
    ) -> Result<Option<Bottle>, sqlx::Error> {
        let query = format!(
            "UPDATE bottles SET
                name = COALESCE($2, name),
                vintage = COALESCE($3, vintage),
                cellar_id = COALESCE($4, cellar_id),
                floor_level = COALESCE($5, floor_level)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.vintage)
            .bind(input.cellar_id)
            .bind(input.floor_level)
            .fetch_optional(pool)
            .await
    }

    /// Delete a bottle and its insights. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bottles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a bottle consumed.
    ///
    /// Returns `None` when the bottle does not exist or is already consumed;
    /// the caller distinguishes the two with [`BottleRepo::find_by_id`].
    pub async fn consume(pool: &PgPool, id: DbId) -> Result<Option<Bottle>, sqlx::Error> {
        let query = format!(
            "UPDATE bottles SET consumed_at = NOW()
             WHERE id = $1 AND consumed_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Clear the consumed flag of a bottle.
    ///
    /// Returns `None` when the bottle does not exist or is not consumed.
    pub async fn restock(pool: &PgPool, id: DbId) -> Result<Option<Bottle>, sqlx::Error> {
        let query = format!(
            "UPDATE bottles SET consumed_at = NULL
             WHERE id = $1 AND consumed_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Engine snapshots of all non-consumed bottles, in catalog order.
    pub async fn list_active_snapshots(pool: &PgPool) -> Result<Vec<BottleSnapshot>, sqlx::Error> {
        let query = format!(
            "{SNAPSHOT_SELECT} WHERE b.consumed_at IS NULL GROUP BY b.id ORDER BY b.id"
        );
        let rows = sqlx::query_as::<_, BottleSnapshotRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(BottleSnapshot::from).collect())
    }

    /// Engine snapshots of the non-consumed bottles stored in one cellar.
    pub async fn list_active_snapshots_in_cellar(
        pool: &PgPool,
        cellar_id: DbId,
    ) -> Result<Vec<BottleSnapshot>, sqlx::Error> {
        let query = format!(
            "{SNAPSHOT_SELECT} WHERE b.consumed_at IS NULL AND b.cellar_id = $1 \
             GROUP BY b.id ORDER BY b.id"
        );
        let rows = sqlx::query_as::<_, BottleSnapshotRow>(&query)
            .bind(cellar_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(BottleSnapshot::from).collect())
    }

    /// Count bottles created and consumed at or after `since`.
    ///
    /// A bottle restocked after being consumed no longer counts as consumed.
    pub async fn activity_since(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<BottleActivityCounts, sqlx::Error> {
        sqlx::query_as::<_, BottleActivityCounts>(
            "SELECT COUNT(*) FILTER (WHERE created_at >= $1) AS entries, \
                    COUNT(*) FILTER (WHERE consumed_at >= $1) AS consumptions \
             FROM bottles",
        )
        .bind(since)
        .fetch_one(pool)
        .await
    }
}
