//! `GET /health`: liveness plus the state of the catalog schema.
//!
//! | Status               | Meaning                                        |
//! |----------------------|------------------------------------------------|
//! | `ok`                 | Database reachable, schema at the built version |
//! | `migrations_pending` | Database reachable, schema older than the build |
//! | `degraded`           | Database unreachable or never migrated          |
//!
//! The route always answers 200 so that load balancers can read the body.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Newest migration applied to the database.
    pub schema_version: Option<i64>,
    /// Newest migration this build ships with.
    pub expected_schema_version: Option<i64>,
}

fn status_for(db_healthy: bool, applied: Option<i64>, expected: Option<i64>) -> &'static str {
    if !db_healthy {
        "degraded"
    } else if applied < expected {
        "migrations_pending"
    } else {
        "ok"
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let expected = cellar_db::latest_migration_version();
    let (db_healthy, applied) = match cellar_db::applied_migration_version(&state.pool).await {
        Ok(applied) => (true, applied),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: schema version unavailable");
            (false, None)
        }
    };

    Json(HealthResponse {
        status: status_for(db_healthy, applied, expected),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        schema_version: applied,
        expected_schema_version: expected,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_is_degraded() {
        assert_eq!(status_for(false, None, Some(4)), "degraded");
    }

    #[test]
    fn older_schema_is_pending() {
        assert_eq!(status_for(true, Some(3), Some(4)), "migrations_pending");
        assert_eq!(status_for(true, None, Some(4)), "migrations_pending");
    }

    #[test]
    fn current_schema_is_ok() {
        assert_eq!(status_for(true, Some(4), Some(4)), "ok");
        assert_eq!(status_for(true, Some(5), Some(4)), "ok");
    }
}
