//! # Lattice StarConvex
//!
//! Shapes that stay star-convex around their origin: every mutation spans
//! the full origin parallelogram of the touched nodes, so each of the six
//! sectors always contains a staircase-bounded region. That invariant is
//! what makes the boundary decomposable into a short list of constituent
//! primitives (triangles, parallelograms, trapezoids, pentagons) by a
//! single walk along each sector's outer boundary.
//!
//! ## Example
//!
//! ```rust
//! use lattice_mesh::GridPoint;
//! use lattice_starconvex::{ShapeType, StarConvex};
//!
//! let mut shape = StarConvex::new(GridPoint::ORIGIN);
//! shape.add_node_convex(GridPoint::new(2, 1));
//! let constituents = shape.constituents().unwrap();
//! assert_eq!(constituents.len(), 1);
//! assert_eq!(constituents[0].shape_type, ShapeType::Parallelogram);
//! ```

pub mod constituents;
pub mod error;
pub mod shape;

pub use constituents::{Constituent, ShapeType};
pub use error::StarConvexError;
pub use shape::StarConvex;
