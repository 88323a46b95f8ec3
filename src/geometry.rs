//! Cuboid geometry: points, chunk buckets, containment and intersection.
//!
//! Decoupled from storage and the claim workflow so the predicates can be
//! tested on their own.

use serde::{Deserialize, Serialize};

/// Edge length of a chunk bucket, in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// An integer block position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A coarse spatial index key: the chunk bucket a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Chunk bucket of a single axis coordinate.
///
/// Positive coordinates round down, negative coordinates round away from
/// zero: `16 -> 1`, `0 -> 0`, `-17 -> -2`. Stored chunk columns were computed
/// with this rule at insert time and are never recomputed, so changing it
/// requires re-indexing every stored region.
fn chunk_axis(c: i32) -> i32 {
    if c > 0 {
        c / CHUNK_SIZE
    } else {
        c.div_euclid(CHUNK_SIZE)
    }
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk bucket containing this point.
    #[must_use]
    pub fn chunk(self) -> ChunkPos {
        ChunkPos {
            x: chunk_axis(self.x),
            y: chunk_axis(self.y),
            z: chunk_axis(self.z),
        }
    }
}

/// An axis-aligned cuboid spanned by two arbitrary corners.
///
/// Corners are kept as picked; min/max are derived per axis on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cuboid {
    pub a: Point,
    pub b: Point,
}

impl Cuboid {
    #[must_use]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Minimum corner (lower x, y, z).
    #[must_use]
    pub fn min(&self) -> Point {
        Point::new(
            self.a.x.min(self.b.x),
            self.a.y.min(self.b.y),
            self.a.z.min(self.b.z),
        )
    }

    /// Maximum corner (upper x, y, z).
    #[must_use]
    pub fn max(&self) -> Point {
        Point::new(
            self.a.x.max(self.b.x),
            self.a.y.max(self.b.y),
            self.a.z.max(self.b.z),
        )
    }

    /// Inclusive block count of the cuboid. Always >= 1; this is the pricing
    /// basis (`price = volume * block_price`).
    #[must_use]
    pub fn volume(&self) -> i64 {
        let dx = i64::from((self.a.x - self.b.x).abs()) + 1;
        let dy = i64::from((self.a.y - self.b.y).abs()) + 1;
        let dz = i64::from((self.a.z - self.b.z).abs()) + 1;
        dx * dy * dz
    }

    /// Whether the point lies inside the cuboid (inclusive bounds).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x
            && p.x <= max.x
            && p.y >= min.y
            && p.y <= max.y
            && p.z >= min.z
            && p.z <= max.z
    }

    /// Whether two cuboids overlap (inclusive bounds — touching faces count).
    #[must_use]
    pub fn intersects(&self, other: &Cuboid) -> bool {
        let (amin, amax) = (self.min(), self.max());
        let (bmin, bmax) = (other.min(), other.max());
        amin.x <= bmax.x
            && amax.x >= bmin.x
            && amin.y <= bmax.y
            && amax.y >= bmin.y
            && amin.z <= bmax.z
            && amax.z >= bmin.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cuboid(a: (i32, i32, i32), b: (i32, i32, i32)) -> Cuboid {
        Cuboid::new(Point::new(a.0, a.1, a.2), Point::new(b.0, b.1, b.2))
    }

    #[test]
    fn volume_is_symmetric_and_inclusive() {
        let a = Point::new(0, 0, 0);
        let b = Point::new(1, 1, 1);
        assert_eq!(Cuboid::new(a, b).volume(), 8);
        assert_eq!(Cuboid::new(b, a).volume(), 8);
        assert_eq!(Cuboid::new(a, a).volume(), 1);
    }

    #[test]
    fn volume_handles_negative_spans() {
        assert_eq!(cuboid((-2, 0, 0), (2, 0, 0)).volume(), 5);
        assert_eq!(cuboid((-1, -1, -1), (-3, -3, -3)).volume(), 27);
    }

    #[test]
    fn contains_is_inclusive_on_every_axis() {
        let c = cuboid((5, 5, 5), (0, 0, 0));
        assert!(c.contains(Point::new(0, 0, 0)));
        assert!(c.contains(Point::new(5, 5, 5)));
        assert!(c.contains(Point::new(3, 1, 4)));
        assert!(!c.contains(Point::new(6, 2, 2)));
        assert!(!c.contains(Point::new(2, -1, 2)));
        assert!(!c.contains(Point::new(2, 2, 6)));
    }

    #[test]
    fn intersects_counts_touching_faces() {
        let base = cuboid((0, 0, 0), (4, 4, 4));
        // Shares the x = 4 face.
        assert!(base.intersects(&cuboid((4, 0, 0), (8, 4, 4))));
        // Shares only the corner block at (4, 4, 4).
        assert!(base.intersects(&cuboid((4, 4, 4), (6, 6, 6))));
        // One block of clearance on x.
        assert!(!base.intersects(&cuboid((6, 0, 0), (9, 4, 4))));
        // Overlapping x/z but disjoint y.
        assert!(!base.intersects(&cuboid((0, 5, 0), (4, 9, 4))));
    }

    #[test]
    fn intersects_is_symmetric() {
        let a = cuboid((0, 0, 0), (2, 2, 2));
        let b = cuboid((1, 1, 1), (9, 9, 9));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn chunk_rounding_matches_stored_data() {
        assert_eq!(Point::new(16, 0, -17).chunk(), ChunkPos { x: 1, y: 0, z: -2 });
        assert_eq!(Point::new(15, 0, 0).chunk(), ChunkPos { x: 0, y: 0, z: 0 });
        assert_eq!(Point::new(-16, 31, -1).chunk(), ChunkPos { x: -1, y: 1, z: -1 });
    }
}
