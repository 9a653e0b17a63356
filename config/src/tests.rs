//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// LATTICE TESTS
// =============================================================================

#[test]
fn test_direction_count_is_six() {
    assert_eq!(DIRECTION_COUNT, 6);
    assert_eq!(DIRECTION_VECTORS.len(), DIRECTION_COUNT);
}

#[test]
fn test_direction_vectors_are_unit_steps() {
    for &(x, y) in &DIRECTION_VECTORS {
        assert!(x.abs() <= 1 && y.abs() <= 1, "direction ({x}, {y}) is not a unit step");
        assert!((x, y) != (0, 0), "zero vector is not a direction");
    }
}

#[test]
fn test_opposite_directions_cancel() {
    for i in 0..DIRECTION_COUNT {
        let (x, y) = DIRECTION_VECTORS[i];
        let (ox, oy) = DIRECTION_VECTORS[(i + 3) % DIRECTION_COUNT];
        assert_eq!((x + ox, y + oy), (0, 0));
    }
}

#[test]
fn test_consecutive_directions_span_sector() {
    // d[i] + d[i+2] == d[i+1] on the triangular lattice.
    for i in 0..DIRECTION_COUNT {
        let (ax, ay) = DIRECTION_VECTORS[i];
        let (bx, by) = DIRECTION_VECTORS[(i + 2) % DIRECTION_COUNT];
        let (mx, my) = DIRECTION_VECTORS[(i + 1) % DIRECTION_COUNT];
        assert_eq!((ax + bx, ay + by), (mx, my));
    }
}

// =============================================================================
// EMBEDDING TESTS
// =============================================================================

#[test]
fn test_row_height_is_triangle_height() {
    let expected = 3.0f64.sqrt() / 2.0;
    assert!((ROW_HEIGHT - expected).abs() < 1e-15);
}

// =============================================================================
// WIRE FORMAT TESTS
// =============================================================================

#[test]
fn test_half_step_scale_is_two() {
    assert_eq!(HALF_STEP_SCALE, 2);
}
