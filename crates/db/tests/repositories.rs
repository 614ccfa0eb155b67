//! Integration tests for the repository layer.
//!
//! These run against a real PostgreSQL instance and are ignored by default:
//! `DATABASE_URL=... cargo test -p cellar-db -- --ignored`.

use cellar_db::models::activity_log::{actions, CreateActivityLog};
use cellar_db::models::bottle::{CreateBottle, UpdateBottle};
use cellar_db::models::insight::CreateInsight;
use cellar_db::repositories::{ActivityLogRepo, BottleRepo, CellarRepo, InsightRepo};
use chrono::{Duration, Utc};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_bottle(name: &str, vintage: Option<i32>) -> CreateBottle {
    CreateBottle {
        name: name.to_string(),
        vintage,
        cellar_id: None,
        floor_level: None,
    }
}

fn placed_bottle(name: &str, cellar_id: i64, floor_level: i32) -> CreateBottle {
    CreateBottle {
        name: name.to_string(),
        vintage: Some(2018),
        cellar_id: Some(cellar_id),
        floor_level: Some(floor_level),
    }
}

fn note(content: &str) -> CreateInsight {
    CreateInsight {
        category: None,
        title: None,
        content: content.to_string(),
        source_name: None,
    }
}

// ---------------------------------------------------------------------------
// Cellars
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_cellar_assigns_floor_levels(pool: PgPool) {
    let cellar = CellarRepo::create(&pool, "Cave", &[Some(12), Some(0), None])
        .await
        .unwrap();

    let levels: Vec<_> = cellar.floors.iter().map(|f| f.level).collect();
    let caps: Vec<_> = cellar.floors.iter().map(|f| f.capacity).collect();
    assert_eq!(levels, vec![1, 2, 3]);
    assert_eq!(caps, vec![Some(12), Some(0), None]);

    let snapshot = cellar.snapshot();
    assert_eq!(snapshot.floor_capacities, vec![Some(12), Some(0), None]);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_replaces_floors(pool: PgPool) {
    let cellar = CellarRepo::create(&pool, "Cave", &[Some(10), Some(10)])
        .await
        .unwrap();

    let updated = CellarRepo::update(&pool, cellar.cellar.id, Some("Garage"), Some(&[Some(4)][..]))
        .await
        .unwrap()
        .expect("cellar exists");

    assert_eq!(updated.cellar.name, "Garage");
    assert_eq!(updated.floors.len(), 1);
    assert_eq!(updated.floors[0].capacity, Some(4));

    let renamed_only = CellarRepo::update(&pool, cellar.cellar.id, Some("Cave"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed_only.floors.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_missing_cellar_returns_none(pool: PgPool) {
    let result = CellarRepo::update(&pool, 999_999, Some("Nope"), None).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleting_cellar_unplaces_bottles(pool: PgPool) {
    let cellar = CellarRepo::create(&pool, "Cave", &[Some(6)]).await.unwrap();
    let bottle = BottleRepo::create(&pool, &placed_bottle("Chinon", cellar.cellar.id, 1))
        .await
        .unwrap();

    assert!(CellarRepo::delete(&pool, cellar.cellar.id).await.unwrap());
    assert!(!CellarRepo::delete(&pool, cellar.cellar.id).await.unwrap());

    let bottle = BottleRepo::find_by_id(&pool, bottle.id).await.unwrap().unwrap();
    assert_eq!(bottle.cellar_id, None);
    assert_eq!(bottle.floor_level, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn floor_exists_checks_declared_levels(pool: PgPool) {
    let cellar = CellarRepo::create(&pool, "Cave", &[Some(6), Some(6)]).await.unwrap();
    let id = cellar.cellar.id;

    assert!(CellarRepo::floor_exists(&pool, id, 2).await.unwrap());
    assert!(!CellarRepo::floor_exists(&pool, id, 3).await.unwrap());
}

// ---------------------------------------------------------------------------
// Bottles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn consume_is_one_shot_and_restock_reverses_it(pool: PgPool) {
    let bottle = BottleRepo::create(&pool, &new_bottle("Margaux", Some(2010)))
        .await
        .unwrap();

    let consumed = BottleRepo::consume(&pool, bottle.id).await.unwrap().unwrap();
    assert!(consumed.is_consumed());
    assert!(BottleRepo::consume(&pool, bottle.id).await.unwrap().is_none());

    let restocked = BottleRepo::restock(&pool, bottle.id).await.unwrap().unwrap();
    assert!(!restocked.is_consumed());
    assert!(BottleRepo::restock(&pool, bottle.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_hides_consumed_by_default(pool: PgPool) {
    let a = BottleRepo::create(&pool, &new_bottle("A", None)).await.unwrap();
    let b = BottleRepo::create(&pool, &new_bottle("B", None)).await.unwrap();
    BottleRepo::consume(&pool, a.id).await.unwrap();

    let active = BottleRepo::list(&pool, false, 50, 0).await.unwrap();
    assert_eq!(active.iter().map(|x| x.id).collect::<Vec<_>>(), vec![b.id]);

    let all = BottleRepo::list(&pool, true, 50, 0).await.unwrap();
    assert_eq!(all.len(), 2);

    let page = BottleRepo::list(&pool, true, 1, 1).await.unwrap();
    assert_eq!(page[0].id, b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_applies_present_fields_only(pool: PgPool) {
    let bottle = BottleRepo::create(&pool, &new_bottle("Old", Some(2001))).await.unwrap();
    let input = UpdateBottle {
        name: Some(" New ".into()),
        vintage: None,
        cellar_id: None,
        floor_level: None,
    };

    let updated = BottleRepo::update(&pool, bottle.id, &input).await.unwrap().unwrap();
    assert_eq!(updated.name, "New");
    assert_eq!(updated.vintage, Some(2001));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn snapshots_join_insights_in_creation_order(pool: PgPool) {
    let bottle = BottleRepo::create(&pool, &new_bottle("Barolo", Some(2015))).await.unwrap();
    let bare = BottleRepo::create(&pool, &new_bottle("Bare", None)).await.unwrap();
    let gone = BottleRepo::create(&pool, &new_bottle("Gone", None)).await.unwrap();
    InsightRepo::create(&pool, bottle.id, &note("Tannic")).await.unwrap();
    InsightRepo::create(&pool, bottle.id, &note("Garde 5 à 10 ans")).await.unwrap();
    BottleRepo::consume(&pool, gone.id).await.unwrap();

    let snapshots = BottleRepo::list_active_snapshots(&pool).await.unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].id, bottle.id);
    assert_eq!(snapshots[0].commentary, vec!["Tannic", "Garde 5 à 10 ans"]);
    assert_eq!(snapshots[1].id, bare.id);
    assert!(snapshots[1].commentary.is_empty());
    assert!(snapshots.iter().all(|s| !s.consumed));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn cellar_snapshots_only_include_that_cellar(pool: PgPool) {
    let cellar = CellarRepo::create(&pool, "Cave", &[Some(6)]).await.unwrap();
    let inside = BottleRepo::create(&pool, &placed_bottle("In", cellar.cellar.id, 1))
        .await
        .unwrap();
    BottleRepo::create(&pool, &new_bottle("Out", None)).await.unwrap();

    let snapshots = BottleRepo::list_active_snapshots_in_cellar(&pool, cellar.cellar.id)
        .await
        .unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].id, inside.id);
    assert_eq!(snapshots[0].floor_level, Some(1));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn unknown_cellar_is_a_foreign_key_violation(pool: PgPool) {
    let err = BottleRepo::create(&pool, &placed_bottle("Orphan", 999_999, 1))
        .await
        .unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// Activity logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn retention_deletes_only_old_rows(pool: PgPool) {
    let entry = CreateActivityLog {
        action: actions::BOTTLE_CONSUMED,
        entity_type: Some("bottle"),
        entity_id: Some(1),
        details: None,
    };
    let old = ActivityLogRepo::record(&pool, &entry).await.unwrap();
    ActivityLogRepo::record(&pool, &entry).await.unwrap();

    sqlx::query("UPDATE activity_logs SET created_at = NOW() - INTERVAL '400 days' WHERE id = $1")
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();

    let deleted = ActivityLogRepo::delete_older_than(&pool, Utc::now() - Duration::days(180))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = ActivityLogRepo::list_for_entity(&pool, "bottle", 1).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].action, actions::BOTTLE_CONSUMED);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn health_check_and_unique_floor_levels(pool: PgPool) {
    cellar_db::health_check(&pool).await.unwrap();

    let cellar = CellarRepo::create(&pool, "Cave", &[Some(6)]).await.unwrap();
    let err = sqlx::query("INSERT INTO cellar_floors (cellar_id, level) VALUES ($1, 1)")
        .bind(cellar.cellar.id)
        .execute(&pool)
        .await
        .unwrap_err();
    let constraint = err.as_database_error().and_then(|e| e.constraint()).map(str::to_string);
    assert_eq!(constraint.as_deref(), Some("uq_cellar_floors_cellar_level"));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn applied_schema_matches_embedded_migrations(pool: PgPool) {
    let applied = cellar_db::applied_migration_version(&pool).await.unwrap();

    assert_eq!(applied, cellar_db::latest_migration_version());
    assert_eq!(applied, Some(20250101000004));
}
