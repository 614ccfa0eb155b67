//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /urgency          -> urgency
/// GET    /occupancy        -> occupancy
/// GET    /maturity         -> maturity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/urgency", get(reports::urgency))
        .route("/occupancy", get(reports::occupancy))
        .route("/maturity", get(reports::maturity))
}
