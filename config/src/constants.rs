//! # Configuration Constants
//!
//! Centralized constants for the lattice shape pipeline. The triangular
//! lattice geometry, its planar embedding and the wire-format scaling
//! factors are defined here.
//!
//! ## Categories
//!
//! - **Lattice**: The unit direction table of the triangular lattice
//! - **Embedding**: Parameters of the 2D planar embedding
//! - **Wire Format**: Scaling applied to exported direction codes

// =============================================================================
// LATTICE CONSTANTS
// =============================================================================

/// Number of unit directions on the triangular lattice.
///
/// Every lattice node has exactly six neighbors; directions are enumerated
/// counterclockwise starting at the positive x axis.
pub const DIRECTION_COUNT: usize = 6;

/// The six unit direction vectors of the triangular lattice.
///
/// Enumerated counterclockwise: index 0 points along the positive x axis,
/// index 3 is its opposite. Consecutive entries span a 60 degree sector,
/// and rotating a point by one step maps each entry to its successor.
///
/// # Example
///
/// ```rust
/// use config::constants::DIRECTION_VECTORS;
///
/// let (dx, dy) = DIRECTION_VECTORS[1];
/// let opposite = DIRECTION_VECTORS[4];
/// assert_eq!((-dx, -dy), opposite);
/// ```
pub const DIRECTION_VECTORS: [(i32, i32); DIRECTION_COUNT] =
    [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

// =============================================================================
// EMBEDDING CONSTANTS
// =============================================================================

/// Vertical distance between lattice rows in the 2D embedding.
///
/// Equal to sqrt(3) / 2, the height of a unit equilateral triangle. The
/// embedding maps grid coordinates `(x, y)` to the plane point
/// `(x + y / 2, y * ROW_HEIGHT)`.
pub const ROW_HEIGHT: f64 = 0.866_025_403_784_438_6;

// =============================================================================
// WIRE FORMAT CONSTANTS
// =============================================================================

/// Scaling factor applied to direction indices in exported constituents.
///
/// Constituent descriptors express directions in half-steps so that
/// directions between two lattice axes remain representable; a full lattice
/// direction `d` is exported as `d * HALF_STEP_SCALE`.
pub const HALF_STEP_SCALE: usize = 2;
