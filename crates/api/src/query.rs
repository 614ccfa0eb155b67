//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination plus the `include_consumed` flag for bottle listings.
#[derive(Debug, Deserialize)]
pub struct BottleListParams {
    #[serde(default)]
    pub include_consumed: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Parameters shared by the report endpoints (`?year=&limit=`).
///
/// `year` overrides the wall clock so reports can be reproduced.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub year: Option<i32>,
    pub limit: Option<i64>,
}
