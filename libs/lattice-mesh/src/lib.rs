//! # Lattice Mesh
//!
//! The editable node/edge/face mesh on a triangular lattice.
//!
//! ## Architecture
//!
//! ```text
//! interaction layer (PickedElement) → lattice-mesh (Mesh)
//!                                       ↑ reused by lattice-snowflake,
//!                                         lattice-starconvex
//! ```
//!
//! All coordinates crossing the crate boundary are global lattice
//! coordinates; a mesh rebases them against its own `position` internally.
//! Mutations on absent targets are silent no-ops so that the interaction
//! layer can probe candidate elements freely.
//!
//! ## Example
//!
//! ```rust
//! use lattice_mesh::{GridPoint, Mesh};
//!
//! let mut mesh = Mesh::new(GridPoint::ORIGIN);
//! mesh.add_edge(GridPoint::ORIGIN, GridPoint::new(1, 0));
//! assert_eq!(mesh.node_count(), 2);
//! assert_eq!(mesh.edge_count(), 1);
//! ```

pub mod grid;
pub mod mesh;
pub mod pick;

pub use grid::{direction_vector, GridPoint};
pub use mesh::Mesh;
pub use pick::PickedElement;
