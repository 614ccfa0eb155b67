//! Repository for the `cellars` and `cellar_floors` tables.

use std::collections::HashMap;

use cellar_core::bottle::CellarSnapshot;
use cellar_core::types::DbId;
use sqlx::PgPool;

use crate::models::cellar::{Cellar, CellarFloor, CellarWithFloors};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

const FLOOR_COLUMNS: &str = "id, cellar_id, level, capacity, created_at, updated_at";

/// Provides CRUD operations for cellars and their floors.
pub struct CellarRepo;

impl CellarRepo {
    /// Insert a cellar and its floors in one transaction.
    ///
    /// Floor levels are assigned 1..=n in the order of `floor_capacities`.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        floor_capacities: &[Option<u32>],
    ) -> Result<CellarWithFloors, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO cellars (name) VALUES ($1) RETURNING {COLUMNS}");
        let cellar = sqlx::query_as::<_, Cellar>(&query)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        let floors = Self::replace_floors_inner(&mut tx, cellar.id, floor_capacities).await?;

        tx.commit().await?;
        Ok(CellarWithFloors { cellar, floors })
    }

    /// Find a cellar row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cellar>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cellars WHERE id = $1");
        sqlx::query_as::<_, Cellar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a cellar with its floors.
    pub async fn find_with_floors(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CellarWithFloors>, sqlx::Error> {
        let Some(cellar) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let floors = Self::list_floors(pool, id).await?;
        Ok(Some(CellarWithFloors { cellar, floors }))
    }

    /// List the floors of one cellar ordered by level.
    pub async fn list_floors(pool: &PgPool, cellar_id: DbId) -> Result<Vec<CellarFloor>, sqlx::Error> {
        let query = format!(
            "SELECT {FLOOR_COLUMNS} FROM cellar_floors WHERE cellar_id = $1 ORDER BY level"
        );
        sqlx::query_as::<_, CellarFloor>(&query)
            .bind(cellar_id)
            .fetch_all(pool)
            .await
    }

    /// List all cellars with their floors, ordered by name then ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<CellarWithFloors>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cellars ORDER BY name, id");
        let cellars = sqlx::query_as::<_, Cellar>(&query).fetch_all(pool).await?;

        let floor_query =
            format!("SELECT {FLOOR_COLUMNS} FROM cellar_floors ORDER BY cellar_id, level");
        let all_floors = sqlx::query_as::<_, CellarFloor>(&floor_query)
            .fetch_all(pool)
            .await?;

        let mut by_cellar: HashMap<DbId, Vec<CellarFloor>> = HashMap::new();
        for floor in all_floors {
            by_cellar.entry(floor.cellar_id).or_default().push(floor);
        }

        Ok(cellars
            .into_iter()
            .map(|cellar| {
                let floors = by_cellar.remove(&cellar.id).unwrap_or_default();
                CellarWithFloors { cellar, floors }
            })
            .collect())
    }

    /// Engine snapshots of every cellar, in [`CellarRepo::list`] order.
    pub async fn list_snapshots(pool: &PgPool) -> Result<Vec<CellarSnapshot>, sqlx::Error> {
        let cellars = Self::list(pool).await?;
        Ok(cellars.iter().map(CellarWithFloors::snapshot).collect())
    }

    /// Rename a cellar and/or replace its floors.
    ///
    /// Returns `None` if no cellar with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        floor_capacities: Option<&[Option<u32>]>,
    ) -> Result<Option<CellarWithFloors>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE cellars SET name = COALESCE($2, name) WHERE id = $1 RETURNING {COLUMNS}"
        );
        let Some(cellar) = sqlx::query_as::<_, Cellar>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let floors = match floor_capacities {
            Some(capacities) => Self::replace_floors_inner(&mut tx, id, capacities).await?,
            None => {
                let floor_query = format!(
                    "SELECT {FLOOR_COLUMNS} FROM cellar_floors WHERE cellar_id = $1 ORDER BY level"
                );
                sqlx::query_as::<_, CellarFloor>(&floor_query)
                    .bind(id)
                    .fetch_all(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(Some(CellarWithFloors { cellar, floors }))
    }

    /// Delete a cellar. Its bottles stay in the catalog, unplaced.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE bottles SET floor_level = NULL WHERE cellar_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM cellars WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether `level` is a declared floor of the cellar.
    pub async fn floor_exists(pool: &PgPool, cellar_id: DbId, level: i32) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM cellar_floors WHERE cellar_id = $1 AND level = $2)",
        )
        .bind(cellar_id)
        .bind(level)
        .fetch_one(pool)
        .await?;
        Ok(exists.0)
    }

    async fn replace_floors_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        cellar_id: DbId,
        floor_capacities: &[Option<u32>],
    ) -> Result<Vec<CellarFloor>, sqlx::Error> {
        sqlx::query("DELETE FROM cellar_floors WHERE cellar_id = $1")
            .bind(cellar_id)
            .execute(&mut **tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO cellar_floors (cellar_id, level, capacity) VALUES ($1, $2, $3) \
             RETURNING {FLOOR_COLUMNS}"
        );
        let mut floors = Vec::with_capacity(floor_capacities.len());
        for (capacity, level) in floor_capacities.iter().zip(1i32..) {
            let floor = sqlx::query_as::<_, CellarFloor>(&insert_query)
                .bind(cellar_id)
                .bind(level)
                .bind(capacity.and_then(|c| i32::try_from(c).ok()))
                .fetch_one(&mut **tx)
                .await?;
            floors.push(floor);
        }

        Ok(floors)
    }
}
