//! Handlers for the `/cellars` resource.
//!
//! Floor capacities are validated here; lowering a capacity below the
//! current bottle count is accepted and reported back as warnings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use cellar_core::capacity::{capacity_edit_warnings, validate_floor_capacities, CapacityWarning};
use cellar_core::error::CoreError;
use cellar_core::occupancy::{compute_occupancy, CellarOccupancy};
use cellar_core::types::DbId;
use cellar_core::validation::validate_name;
use cellar_db::models::activity_log::{actions, CreateActivityLog};
use cellar_db::models::cellar::{CellarWithFloors, CreateCellar, UpdateCellar};
use cellar_db::repositories::{BottleRepo, CellarRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::record_activity;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An edited cellar with the capacity warnings the edit produced.
#[derive(Debug, Serialize)]
pub struct CellarUpdateResponse {
    #[serde(flatten)]
    pub cellar: CellarWithFloors,
    pub warnings: Vec<CapacityWarning>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a cellar exists, returning it with its floors.
async fn ensure_cellar_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<CellarWithFloors> {
    CellarRepo::find_with_floors(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Cellar",
            id,
        })
    })
}

/// Current occupancy of one cellar.
async fn load_cellar_occupancy(
    pool: &sqlx::PgPool,
    cellar: &CellarWithFloors,
) -> AppResult<CellarOccupancy> {
    let bottles = BottleRepo::list_active_snapshots_in_cellar(pool, cellar.cellar.id).await?;
    compute_occupancy(&[cellar.snapshot()], &bottles)
        .cellars
        .into_iter()
        .next()
        .ok_or_else(|| AppError::InternalError("Occupancy report missing cellar".to_string()))
}

// ---------------------------------------------------------------------------
// GET /cellars
// ---------------------------------------------------------------------------

pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cellars = CellarRepo::list(&state.pool).await?;
    tracing::debug!(count = cellars.len(), "Listed cellars");
    Ok(Json(DataResponse { data: cellars }))
}

// ---------------------------------------------------------------------------
// POST /cellars
// ---------------------------------------------------------------------------

/// Create a cellar with its floors.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCellar>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name(&input.name, "Cellar")?;
    let capacities = validate_floor_capacities(&input.floor_capacities)?;

    let cellar = CellarRepo::create(&state.pool, name, &capacities).await?;

    tracing::info!(
        cellar_id = cellar.cellar.id,
        floors = cellar.floors.len(),
        "Cellar created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: cellar })))
}

// ---------------------------------------------------------------------------
// GET /cellars/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let cellar = ensure_cellar_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: cellar }))
}

// ---------------------------------------------------------------------------
// PUT /cellars/{id}
// ---------------------------------------------------------------------------

/// Rename a cellar and/or replace its floors.
///
/// Floors that end up holding more bottles than their new capacity, or that
/// are removed while still holding bottles, produce warnings. The edit is
/// saved either way.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCellar>,
) -> AppResult<impl IntoResponse> {
    let name = input
        .name
        .as_deref()
        .map(|n| validate_name(n, "Cellar"))
        .transpose()?;
    let capacities = input
        .floor_capacities
        .as_deref()
        .map(validate_floor_capacities)
        .transpose()?;

    let existing = ensure_cellar_exists(&state.pool, id).await?;

    let warnings = match &capacities {
        Some(new_capacities) => {
            let current = load_cellar_occupancy(&state.pool, &existing).await?;
            capacity_edit_warnings(&current, new_capacities)
        }
        None => Vec::new(),
    };

    let cellar = CellarRepo::update(&state.pool, id, name, capacities.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Cellar",
            id,
        }))?;

    for warning in &warnings {
        tracing::warn!(
            cellar_id = id,
            level = warning.level,
            bottle_count = warning.bottle_count,
            kind = ?warning.kind,
            "Cellar capacity warning"
        );
    }
    tracing::info!(cellar_id = id, warnings = warnings.len(), "Cellar updated");

    record_activity(
        &state.pool,
        CreateActivityLog {
            action: actions::CELLAR_UPDATED,
            entity_type: Some("cellar"),
            entity_id: Some(id),
            details: Some(json!({
                "floors": cellar.floors.len(),
                "warnings": warnings.len(),
            })),
        },
    )
    .await;

    Ok(Json(DataResponse {
        data: CellarUpdateResponse { cellar, warnings },
    }))
}

// ---------------------------------------------------------------------------
// DELETE /cellars/{id}
// ---------------------------------------------------------------------------

/// Delete a cellar. Its bottles remain in the catalog, unplaced.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = CellarRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(cellar_id = id, "Cellar deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Cellar",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// GET /cellars/{id}/occupancy
// ---------------------------------------------------------------------------

pub async fn occupancy(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let cellar = ensure_cellar_exists(&state.pool, id).await?;
    let report = load_cellar_occupancy(&state.pool, &cellar).await?;
    Ok(Json(DataResponse { data: report }))
}
