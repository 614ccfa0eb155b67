//! Route definitions for the `/bottles` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bottles;
use crate::state::AppState;

/// Routes mounted at `/bottles`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// POST   /{id}/consume     -> consume
/// POST   /{id}/restock     -> restock
/// GET    /{id}/insights    -> list_insights
/// POST   /{id}/insights    -> add_insight
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bottles::list).post(bottles::create))
        .route(
            "/{id}",
            get(bottles::get_by_id)
                .put(bottles::update)
                .delete(bottles::delete),
        )
        .route("/{id}/consume", post(bottles::consume))
        .route("/{id}/restock", post(bottles::restock))
        .route(
            "/{id}/insights",
            get(bottles::list_insights).post(bottles::add_insight),
        )
}
