//! # Config Crate
//!
//! Centralized configuration constants for the lattice shape pipeline.
//! All magic numbers shared between the mesh, snowflake, star-convex and
//! export crates are defined here to ensure consistency.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DIRECTION_COUNT, DIRECTION_VECTORS};
//!
//! // The six unit directions of the triangular lattice, counterclockwise.
//! assert_eq!(DIRECTION_VECTORS.len(), DIRECTION_COUNT);
//! assert_eq!(DIRECTION_VECTORS[0], (1, 0));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Integer First**: Lattice geometry stays in integer arithmetic;
//!   floating point only appears at the embedding boundary
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
