//! # Grid Geometry
//!
//! Integer coordinates on the triangular lattice, the six unit directions,
//! 60 degree rotation and the conversion into a 2D planar embedding.
//!
//! Rotation and direction lookup are pure integer arithmetic; floating
//! point only appears in [`GridPoint::to_embedding`], which produces the
//! plane coordinates used for geometric comparisons and rendering.

use config::constants::{DIRECTION_COUNT, DIRECTION_VECTORS, ROW_HEIGHT};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A point (or delta) on the triangular lattice.
///
/// The lattice is indexed by an integer pair `(x, y)`; the `y` axis is
/// skewed by half a step per row in the planar embedding, which makes all
/// six neighbors of a node equidistant.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::GridPoint;
///
/// let p = GridPoint::new(2, 1);
/// assert_eq!(p.rotated(6), p);
/// assert_eq!(p + GridPoint::new(-2, -1), GridPoint::ORIGIN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    /// The lattice origin `(0, 0)`.
    pub const ORIGIN: GridPoint = GridPoint { x: 0, y: 0 };

    /// Creates a grid point from its two integer coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotates the point by `k` steps of 60 degrees counterclockwise.
    ///
    /// The rotation is the linear transform sending the unit vectors of
    /// directions 0 and 1 to those of directions `k` and `k + 1`; `k` is
    /// taken mod 6, so negative step counts rotate clockwise.
    pub fn rotated(self, k: i32) -> Self {
        let k = k.rem_euclid(DIRECTION_COUNT as i32) as usize;
        let (ax, ay) = DIRECTION_VECTORS[k];
        let (bx, by) = DIRECTION_VECTORS[(k + 1) % DIRECTION_COUNT];
        Self {
            x: ax * self.x + bx * self.y,
            y: ay * self.x + by * self.y,
        }
    }

    /// Returns the direction index (0..6) if this point is one of the six
    /// unit direction vectors, `None` otherwise.
    pub fn direction_index(self) -> Option<usize> {
        DIRECTION_VECTORS.iter().position(|&(x, y)| x == self.x && y == self.y)
    }

    /// Maps the lattice coordinate into the 2D plane.
    ///
    /// One axis plus a half-step skew on the other:
    /// `(x + y / 2, y * ROW_HEIGHT)`. Purely derived, never persisted.
    pub fn to_embedding(self) -> DVec2 {
        DVec2::new(self.x as f64 + self.y as f64 / 2.0, self.y as f64 * ROW_HEIGHT)
    }
}

/// Returns the unit vector of the given direction index (taken mod 6).
pub fn direction_vector(direction: usize) -> GridPoint {
    let (x, y) = DIRECTION_VECTORS[direction % DIRECTION_COUNT];
    GridPoint::new(x, y)
}

impl Add for GridPoint {
    type Output = GridPoint;

    fn add(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPoint {
    type Output = GridPoint;

    fn sub(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for GridPoint {
    type Output = GridPoint;

    fn neg(self) -> GridPoint {
        GridPoint::new(-self.x, -self.y)
    }
}

impl Mul<i32> for GridPoint {
    type Output = GridPoint;

    fn mul(self, rhs: i32) -> GridPoint {
        GridPoint::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycles_directions() {
        for d in 0..DIRECTION_COUNT {
            let v = direction_vector(d);
            assert_eq!(v.rotated(1), direction_vector(d + 1));
        }
    }

    #[test]
    fn test_rotation_identity_and_full_turn() {
        let p = GridPoint::new(3, -2);
        assert_eq!(p.rotated(0), p);
        assert_eq!(p.rotated(6), p);
        assert_eq!(p.rotated(-6), p);
    }

    #[test]
    fn test_rotation_composes() {
        let p = GridPoint::new(2, 1);
        assert_eq!(p.rotated(2).rotated(3), p.rotated(5));
    }

    #[test]
    fn test_half_turn_negates() {
        let p = GridPoint::new(4, -1);
        assert_eq!(p.rotated(3), -p);
    }

    #[test]
    fn test_direction_index_roundtrip() {
        for d in 0..DIRECTION_COUNT {
            assert_eq!(direction_vector(d).direction_index(), Some(d));
        }
        assert_eq!(GridPoint::new(2, 0).direction_index(), None);
        assert_eq!(GridPoint::ORIGIN.direction_index(), None);
    }

    #[test]
    fn test_embedding_skews_rows() {
        let p = GridPoint::new(0, 2).to_embedding();
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 3.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_embedding_neighbors_equidistant() {
        let origin = GridPoint::ORIGIN.to_embedding();
        for d in 0..DIRECTION_COUNT {
            let n = direction_vector(d).to_embedding();
            assert!((origin.distance(n) - 1.0).abs() < 1e-12);
        }
    }
}
