//! # Lattice Snowflake
//!
//! Recursively composed snowflake shapes: each snowflake owns six arm
//! lengths and, per direction, a list of child attachments overlaying a
//! rotated and shifted copy of another snowflake's mesh. Snowflakes form a
//! DAG addressed by stable arena handles; a snowflake's mesh is always a
//! pure function of its arms and its children's derived meshes.
//!
//! ## Architecture
//!
//! ```text
//! SnowflakeEditor (selection state machine)
//!     → SnowflakeArena (handles, DAG, re-derivation, dependency tree)
//!         → Snowflake (arms, attachments, mesh cache)
//!         → shifted_mesh (overlay generator)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lattice_mesh::GridPoint;
//! use lattice_snowflake::SnowflakeArena;
//!
//! let mut arena = SnowflakeArena::new();
//! let id = arena.insert(GridPoint::ORIGIN);
//! arena.flake_mut(id).extend_arm(0, 3);
//! assert_eq!(arena.flake(id).mesh().node_count(), 4);
//! ```

pub mod arena;
pub mod editor;
pub mod error;
pub mod flake;
pub mod shift;

pub use arena::{AttachmentRef, DependencyNode, SnowflakeArena, SnowflakeId};
pub use editor::{ArmEdge, SnowflakeEditor};
pub use error::SnowflakeError;
pub use flake::{Attachment, Snowflake};
pub use shift::shifted_mesh;
