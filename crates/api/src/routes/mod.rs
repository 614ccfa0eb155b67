pub mod bottles;
pub mod cellars;
pub mod health;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cellars                                  list, create
/// /cellars/{id}                             get, update (with capacity warnings), delete
/// /cellars/{id}/occupancy                   single-cellar occupancy
///
/// /bottles                                  list (?include_consumed, limit, offset), create
/// /bottles/{id}                             get (with insights), update, delete
/// /bottles/{id}/consume                     mark consumed (POST)
/// /bottles/{id}/restock                     clear consumed flag (POST)
/// /bottles/{id}/insights                    list, add
///
/// /reports/urgency                          drink-soon ranking (?year, limit)
/// /reports/occupancy                        all-cellar occupancy
/// /reports/maturity                         maturity breakdown (?year)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cellars", cellars::router())
        .nest("/bottles", bottles::router())
        .nest("/reports", reports::router())
}
