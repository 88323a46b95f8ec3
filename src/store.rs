//! Region storage: the `lands` table, indexed by the chunk buckets of both
//! corners for coarse spatial lookup.
//!
//! Every query prefilters on the stored chunk columns and only then runs the
//! exact geometry test, so overlap and containment checks touch the regions
//! near the query instead of the whole table.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::geometry::{ChunkPos, Point};
use crate::region::{OwnerId, Region, RegionId};

const MIGRATION_SQL: &str = include_str!("../migrations/001_init_lands.sql");

/// Raw `lands` row: rowid, owner, trusted JSON, both corners, both buckets.
type LandRow = (
    i64,
    i64,
    String,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
    i32,
);

/// Durable table of claimed regions.
///
/// Readers go through the same pool as the writer; a region becomes visible
/// only once its single-statement insert has committed, so no reader ever
/// observes a partially indexed row.
pub struct LandStore {
    pub(crate) pool: SqlitePool,
}

impl LandStore {
    /// Open (creating if missing) the database file and run migrations.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;
        log::info!("landmanager: Opened land store at {path:?}");
        Ok(store)
    }

    /// In-memory store for tests and tooling. Capped at one connection so
    /// every handle sees the same database.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run migration SQL statements (semicolon-separated, comments stripped).
    async fn migrate(&self) -> Result<(), StoreError> {
        let stripped: String = MIGRATION_SQL
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");

        for statement in stripped.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError(format!("migration failed: {e}")))?;
        }
        Ok(())
    }

    /// Insert a region, returning its stable id. Both chunk-bucket index
    /// columns are written from the region's precomputed buckets.
    pub async fn insert(&self, region: &Region) -> Result<RegionId, StoreError> {
        let trusted = serde_json::to_string(&region.trusted)
            .map_err(|e| StoreError(format!("trusted encode: {e}")))?;

        let result = sqlx::query(
            "INSERT INTO lands \
             (owner, trusted, x1, y1, z1, x2, y2, z2, chkx1, chky1, chkz1, chkx2, chky2, chkz2) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(region.owner)
        .bind(&trusted)
        .bind(region.a.x)
        .bind(region.a.y)
        .bind(region.a.z)
        .bind(region.b.x)
        .bind(region.b.y)
        .bind(region.b.z)
        .bind(region.chunk_a.x)
        .bind(region.chunk_a.y)
        .bind(region.chunk_a.z)
        .bind(region.chunk_b.x)
        .bind(region.chunk_b.y)
        .bind(region.chunk_b.z)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Remove a region and its index entries.
    pub async fn delete(&self, id: RegionId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM lands WHERE rowid = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Change the owner field only; extents and buckets stay as created.
    pub async fn reassign_owner(
        &self,
        id: RegionId,
        new_owner: OwnerId,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE lands SET owner = ? WHERE rowid = ?")
            .bind(new_owner)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All regions with either corner stored in the given chunk bucket.
    /// This is the coarse prefilter; callers run the exact geometry test.
    pub async fn find_by_chunk_bucket(
        &self,
        bucket: ChunkPos,
    ) -> Result<Vec<(RegionId, Region)>, StoreError> {
        let rows: Vec<LandRow> = sqlx::query_as(
            "SELECT rowid, owner, trusted, x1, y1, z1, x2, y2, z2, \
             chkx1, chky1, chkz1, chkx2, chky2, chkz2 FROM lands \
             WHERE (chkx1 = ? AND chky1 = ? AND chkz1 = ?) \
             OR (chkx2 = ? AND chky2 = ? AND chkz2 = ?)",
        )
        .bind(bucket.x)
        .bind(bucket.y)
        .bind(bucket.z)
        .bind(bucket.x)
        .bind(bucket.y)
        .bind(bucket.z)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_region).collect())
    }

    /// Number of claims held by an owner.
    pub async fn count_by_owner(&self, owner: OwnerId) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lands WHERE owner = ?")
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Ids of regions containing the point, in table order. Bucket prefilter
    /// by the point's chunk, then exact containment. `owner` optionally
    /// scopes the lookup to one identity (sell/give pass the issuer; the
    /// permission gate passes `None`).
    pub async fn find_containing(
        &self,
        point: Point,
        owner: Option<OwnerId>,
    ) -> Result<Vec<RegionId>, StoreError> {
        let chunk = point.chunk();

        let rows: Vec<LandRow> = if let Some(owner) = owner {
            sqlx::query_as(
                "SELECT rowid, owner, trusted, x1, y1, z1, x2, y2, z2, \
                 chkx1, chky1, chkz1, chkx2, chky2, chkz2 FROM lands \
                 WHERE owner = ? AND ((chkx1 = ? AND chky1 = ? AND chkz1 = ?) \
                 OR (chkx2 = ? AND chky2 = ? AND chkz2 = ?))",
            )
            .bind(owner)
            .bind(chunk.x)
            .bind(chunk.y)
            .bind(chunk.z)
            .bind(chunk.x)
            .bind(chunk.y)
            .bind(chunk.z)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                "SELECT rowid, owner, trusted, x1, y1, z1, x2, y2, z2, \
                 chkx1, chky1, chkz1, chkx2, chky2, chkz2 FROM lands \
                 WHERE (chkx1 = ? AND chky1 = ? AND chkz1 = ?) \
                 OR (chkx2 = ? AND chky2 = ? AND chkz2 = ?)",
            )
            .bind(chunk.x)
            .bind(chunk.y)
            .bind(chunk.z)
            .bind(chunk.x)
            .bind(chunk.y)
            .bind(chunk.z)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows
            .into_iter()
            .map(row_to_region)
            .filter(|(_, r)| r.cuboid().contains(point))
            .map(|(id, _)| id)
            .collect())
    }
}

fn row_to_region(row: LandRow) -> (RegionId, Region) {
    let (id, owner, trusted, x1, y1, z1, x2, y2, z2, cx1, cy1, cz1, cx2, cy2, cz2) = row;
    // A corrupt trusted column degrades to an empty list rather than failing
    // the whole query.
    let trusted: Vec<OwnerId> = serde_json::from_str(&trusted).unwrap_or_else(|e| {
        log::warn!("landmanager: Bad trusted column on region {id}: {e}");
        Vec::new()
    });
    (
        id,
        Region {
            owner,
            trusted,
            a: Point::new(x1, y1, z1),
            b: Point::new(x2, y2, z2),
            chunk_a: ChunkPos {
                x: cx1,
                y: cy1,
                z: cz1,
            },
            chunk_b: ChunkPos {
                x: cx2,
                y: cy2,
                z: cz2,
            },
        },
    )
}
