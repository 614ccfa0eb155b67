//! Route definitions for the `/cellars` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::cellars;
use crate::state::AppState;

/// Routes mounted at `/cellars`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/occupancy   -> occupancy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cellars::list).post(cellars::create))
        .route(
            "/{id}",
            get(cellars::get_by_id)
                .put(cellars::update)
                .delete(cellars::delete),
        )
        .route("/{id}/occupancy", get(cellars::occupancy))
}
