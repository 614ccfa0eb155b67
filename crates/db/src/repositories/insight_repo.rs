//! Repository for the `bottle_insights` table.

use cellar_core::types::DbId;
use sqlx::PgPool;

use crate::models::insight::{CreateInsight, Insight};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, bottle_id, category, title, content, source_name, created_at, updated_at";

/// Provides operations for bottle insights.
pub struct InsightRepo;

impl InsightRepo {
    /// Attach an insight to a bottle, returning the created row.
    pub async fn create(
        pool: &PgPool,
        bottle_id: DbId,
        input: &CreateInsight,
    ) -> Result<Insight, sqlx::Error> {
        let query = format!(
            "INSERT INTO bottle_insights (bottle_id, category, title, content, source_name)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Insight>(&query)
            .bind(bottle_id)
            .bind(&input.category)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.source_name)
            .fetch_one(pool)
            .await
    }

    /// List a bottle's insights in creation order.
    pub async fn list_by_bottle(pool: &PgPool, bottle_id: DbId) -> Result<Vec<Insight>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bottle_insights WHERE bottle_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Insight>(&query)
            .bind(bottle_id)
            .fetch_all(pool)
            .await
    }
}
