//! Handlers for the `/bottles` resource.
//!
//! Covers catalog CRUD, the consume/restock lifecycle and insight
//! commentary. Placement (cellar + floor) is checked against the stored
//! cellars before anything is written.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use cellar_core::error::CoreError;
use cellar_core::types::DbId;
use cellar_core::validation::{
    validate_floor_placement, validate_limit, validate_name, validate_vintage,
};
use cellar_db::models::activity_log::{actions, CreateActivityLog};
use cellar_db::models::bottle::{Bottle, BottleWithInsights, CreateBottle, UpdateBottle};
use cellar_db::models::insight::CreateInsight;
use cellar_db::repositories::{BottleRepo, CellarRepo, InsightRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::record_activity;
use crate::query::BottleListParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Page size used when `?limit` is omitted.
const DEFAULT_PAGE_SIZE: i64 = 50;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a bottle exists, returning the full row.
async fn ensure_bottle_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Bottle> {
    BottleRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Bottle",
            id,
        })
    })
}

/// Check that the referenced cellar exists and declares the floor.
async fn ensure_placement_exists(
    pool: &sqlx::PgPool,
    cellar_id: Option<DbId>,
    floor_level: Option<i32>,
) -> AppResult<()> {
    validate_floor_placement(cellar_id, floor_level)?;

    let Some(cellar_id) = cellar_id else {
        return Ok(());
    };
    if CellarRepo::find_by_id(pool, cellar_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cellar {cellar_id} does not exist"
        ))));
    }
    if let Some(level) = floor_level {
        if !CellarRepo::floor_exists(pool, cellar_id, level).await? {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Cellar {cellar_id} has no floor {level}"
            ))));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /bottles
// ---------------------------------------------------------------------------

/// List bottles in catalog order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BottleListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = validate_limit(params.limit, DEFAULT_PAGE_SIZE)?;
    let offset = params.offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::BadRequest(format!(
            "offset must be >= 0, got {offset}"
        )));
    }

    let bottles =
        BottleRepo::list(&state.pool, params.include_consumed, limit, offset).await?;

    tracing::debug!(
        count = bottles.len(),
        include_consumed = params.include_consumed,
        "Listed bottles"
    );

    Ok(Json(PageResponse {
        data: bottles,
        limit,
        offset,
    }))
}

// ---------------------------------------------------------------------------
// POST /bottles
// ---------------------------------------------------------------------------

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBottle>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name, "Bottle")?;
    validate_vintage(input.vintage)?;
    ensure_placement_exists(&state.pool, input.cellar_id, input.floor_level).await?;

    let bottle = BottleRepo::create(&state.pool, &input).await?;

    tracing::info!(
        bottle_id = bottle.id,
        vintage = ?bottle.vintage,
        cellar_id = ?bottle.cellar_id,
        "Bottle created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: bottle })))
}

// ---------------------------------------------------------------------------
// GET /bottles/{id}
// ---------------------------------------------------------------------------

/// Get a bottle with its insights.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let bottle = ensure_bottle_exists(&state.pool, id).await?;
    let insights = InsightRepo::list_by_bottle(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: BottleWithInsights { bottle, insights },
    }))
}

// ---------------------------------------------------------------------------
// PUT /bottles/{id}
// ---------------------------------------------------------------------------

/// Update a bottle. Placement is re-checked against the merged result.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBottle>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_name(name, "Bottle")?;
    }
    validate_vintage(input.vintage)?;

    let existing = ensure_bottle_exists(&state.pool, id).await?;

    if input.cellar_id.is_some() || input.floor_level.is_some() {
        let cellar_id = input.cellar_id.or(existing.cellar_id);
        let floor_level = input.floor_level.or(existing.floor_level);
        ensure_placement_exists(&state.pool, cellar_id, floor_level).await?;
    }

    let bottle = BottleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bottle",
            id,
        }))?;

    tracing::info!(bottle_id = id, "Bottle updated");

    Ok(Json(DataResponse { data: bottle }))
}

// ---------------------------------------------------------------------------
// DELETE /bottles/{id}
// ---------------------------------------------------------------------------

pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = BottleRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(bottle_id = id, "Bottle deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Bottle",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// POST /bottles/{id}/consume
// ---------------------------------------------------------------------------

/// Mark a bottle consumed. Consuming an already-consumed bottle is a conflict.
pub async fn consume(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let Some(bottle) = BottleRepo::consume(&state.pool, id).await? else {
        ensure_bottle_exists(&state.pool, id).await?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Bottle {id} is already consumed"
        ))));
    };

    tracing::info!(bottle_id = id, "Bottle consumed");

    record_activity(
        &state.pool,
        CreateActivityLog {
            action: actions::BOTTLE_CONSUMED,
            entity_type: Some("bottle"),
            entity_id: Some(id),
            details: None,
        },
    )
    .await;

    Ok(Json(DataResponse { data: bottle }))
}

// ---------------------------------------------------------------------------
// POST /bottles/{id}/restock
// ---------------------------------------------------------------------------

/// Return a consumed bottle to the cellar.
pub async fn restock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let Some(bottle) = BottleRepo::restock(&state.pool, id).await? else {
        ensure_bottle_exists(&state.pool, id).await?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Bottle {id} is not consumed"
        ))));
    };

    tracing::info!(bottle_id = id, "Bottle restocked");

    record_activity(
        &state.pool,
        CreateActivityLog {
            action: actions::BOTTLE_RESTOCKED,
            entity_type: Some("bottle"),
            entity_id: Some(id),
            details: None,
        },
    )
    .await;

    Ok(Json(DataResponse { data: bottle }))
}

// ---------------------------------------------------------------------------
// GET /bottles/{id}/insights
// ---------------------------------------------------------------------------

/// List a bottle's insights in creation order.
pub async fn list_insights(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_bottle_exists(&state.pool, id).await?;
    let insights = InsightRepo::list_by_bottle(&state.pool, id).await?;
    Ok(Json(DataResponse { data: insights }))
}

// ---------------------------------------------------------------------------
// POST /bottles/{id}/insights
// ---------------------------------------------------------------------------

/// Attach commentary to a bottle.
pub async fn add_insight(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateInsight>,
) -> AppResult<impl IntoResponse> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Insight content must not be empty".to_string(),
        )));
    }
    ensure_bottle_exists(&state.pool, id).await?;

    let insight = InsightRepo::create(&state.pool, id, &input).await?;

    tracing::info!(bottle_id = id, insight_id = insight.id, "Insight added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: insight })))
}
