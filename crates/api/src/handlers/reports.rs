//! Handlers for the `/reports` resource.
//!
//! Each request loads one snapshot of the catalog and runs the engine on it
//! for a single year, read from the wall clock once unless `?year` is given.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use cellar_core::error::CoreError;
use cellar_core::maturity::{maturity_breakdown, MaturityCount};
use cellar_core::occupancy::compute_occupancy;
use cellar_core::ranking::{rank_by_urgency, RankedBottle, TierCounts};
use cellar_core::types::{year_of, Year};
use cellar_core::validation::{validate_limit, MAX_VINTAGE, MIN_VINTAGE};
use cellar_db::repositories::{BottleRepo, CellarRepo};

use crate::error::{AppError, AppResult};
use crate::query::ReportParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UrgencyReport {
    pub year: Year,
    pub tier_counts: TierCounts,
    /// Number of ranked (non-consumed) bottles.
    pub total: usize,
    pub bottles: Vec<RankedBottle>,
}

#[derive(Debug, Serialize)]
pub struct MaturityReport {
    pub year: Year,
    pub breakdown: Vec<MaturityCount>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The requested year, or the current one.
fn resolve_year(requested: Option<Year>) -> AppResult<Year> {
    match requested {
        None => Ok(year_of(Utc::now())),
        Some(y) if (MIN_VINTAGE..=MAX_VINTAGE).contains(&y) => Ok(y),
        Some(y) => Err(AppError::Core(CoreError::Validation(format!(
            "year must be between {MIN_VINTAGE} and {MAX_VINTAGE}, got {y}"
        )))),
    }
}

// ---------------------------------------------------------------------------
// GET /reports/urgency
// ---------------------------------------------------------------------------

/// Drink-soon ranking of the cellar.
pub async fn urgency(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let year = resolve_year(params.year)?;
    let limit = validate_limit(params.limit, state.config.urgency_report_limit)?;

    let bottles = BottleRepo::list_active_snapshots(&state.pool).await?;
    let ranking = rank_by_urgency(&bottles, year);
    let tier_counts = ranking.tier_counts();

    let report = UrgencyReport {
        year,
        tier_counts,
        total: tier_counts.total(),
        bottles: ranking.top(limit as usize),
    };

    tracing::debug!(year, total = report.total, critical = tier_counts.critical, "Urgency report");

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// GET /reports/occupancy
// ---------------------------------------------------------------------------

/// Fill levels of every cellar.
pub async fn occupancy(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cellars = CellarRepo::list_snapshots(&state.pool).await?;
    let bottles = BottleRepo::list_active_snapshots(&state.pool).await?;

    let report = compute_occupancy(&cellars, &bottles);

    tracing::debug!(
        cellars = report.cellars.len(),
        total_bottles = report.total_bottles,
        unplaced = report.unplaced_bottles,
        "Occupancy report"
    );

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// GET /reports/maturity
// ---------------------------------------------------------------------------

/// Bottle counts per maturity state.
pub async fn maturity(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let year = resolve_year(params.year)?;
    let bottles = BottleRepo::list_active_snapshots(&state.pool).await?;

    let report = MaturityReport {
        year,
        breakdown: maturity_breakdown(&bottles, year),
    };

    Ok(Json(DataResponse { data: report }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn explicit_year_is_kept() {
        assert_eq!(resolve_year(Some(2025)).unwrap(), 2025);
    }

    #[test]
    fn missing_year_uses_clock() {
        assert_eq!(resolve_year(None).unwrap(), year_of(Utc::now()));
    }

    #[test]
    fn out_of_range_year_rejected() {
        assert_matches!(
            resolve_year(Some(99)),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
