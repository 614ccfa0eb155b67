//! Bottle insight models.
//!
//! Insights are free-text commentary attached to a bottle. Their contents,
//! joined in creation order, feed the aging-window extractor.

use cellar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bottle_insights` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Insight {
    pub id: DbId,
    pub bottle_id: DbId,
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: String,
    pub source_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an insight to a bottle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInsight {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: String,
    pub source_name: Option<String>,
}
