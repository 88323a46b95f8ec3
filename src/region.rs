//! The persisted claim entity.

use serde::{Deserialize, Serialize};

use crate::geometry::{ChunkPos, Cuboid, Point};

/// Stable player identity used for ownership and economy lookups
/// (the `owner` column of the `lands` table).
pub type OwnerId = i64;

/// Row identifier of a stored region (SQLite rowid).
pub type RegionId = i64;

/// A claimed axis-aligned cuboid of world space owned by one identity.
///
/// Corners are stored exactly as selected; the chunk buckets of both corners
/// are denormalized here so the store can index them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub owner: OwnerId,
    /// Secondary identities allowed to build here. Stored as a JSON array;
    /// currently always empty.
    pub trusted: Vec<OwnerId>,
    pub a: Point,
    pub b: Point,
    pub chunk_a: ChunkPos,
    pub chunk_b: ChunkPos,
}

impl Region {
    /// Build a region from two selected corners, computing the chunk buckets
    /// that will be written to the index columns.
    #[must_use]
    pub fn new(owner: OwnerId, a: Point, b: Point) -> Self {
        Self {
            owner,
            trusted: Vec::new(),
            a,
            b,
            chunk_a: a.chunk(),
            chunk_b: b.chunk(),
        }
    }

    /// The claimed cuboid.
    #[must_use]
    pub const fn cuboid(&self) -> Cuboid {
        Cuboid::new(self.a, self.b)
    }

    /// Whether the identity may modify blocks inside this region.
    #[must_use]
    pub fn allows(&self, id: OwnerId) -> bool {
        self.owner == id || self.trusted.contains(&id)
    }
}
