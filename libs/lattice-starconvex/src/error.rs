//! Error types for the star-convex decomposition.

use thiserror::Error;

/// Errors that can occur while decomposing a star-convex shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StarConvexError {
    /// The boundary walk of one sector ran off the shape, which means the
    /// shape lost its star-convexity invariant.
    #[error("boundary traversal of sector {sector} failed: shape is not star-convex")]
    TraversalFailed { sector: usize },
}
