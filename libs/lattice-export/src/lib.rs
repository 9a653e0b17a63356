//! # Lattice Export
//!
//! Assembles the JSON document consumed by the render layer. Every shape
//! kind exports the same three-part document: the raw mesh, the list of
//! constituent primitives (star-convex shapes only) and the dependency
//! tree (snowflakes only); the unused parts stay empty rather than being
//! omitted, so consumers read one fixed schema.

use lattice_mesh::{GridPoint, Mesh};
use lattice_snowflake::{DependencyNode, SnowflakeArena, SnowflakeError, SnowflakeId};
use lattice_starconvex::{Constituent, StarConvex, StarConvexError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while assembling or printing a document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Snowflake(#[from] SnowflakeError),
    #[error(transparent)]
    StarConvex(#[from] StarConvexError),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One mesh edge as an index pair record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub u: usize,
    pub v: usize,
}

/// One mesh face as an index triple record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub u: usize,
    pub v: usize,
    pub w: usize,
}

/// The mesh part of a document: nodes in local grid coordinates, edges
/// and faces as index records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeBody {
    pub nodes: Vec<GridPoint>,
    pub edges: Vec<EdgeRecord>,
    pub faces: Vec<FaceRecord>,
}

impl From<&Mesh> for ShapeBody {
    fn from(mesh: &Mesh) -> Self {
        Self {
            nodes: mesh.nodes().to_vec(),
            edges: mesh
                .edges()
                .iter()
                .map(|&(u, v)| EdgeRecord { u, v })
                .collect(),
            faces: mesh
                .faces()
                .iter()
                .map(|&(u, v, w)| FaceRecord { u, v, w })
                .collect(),
        }
    }
}

/// The complete export document of one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDocument {
    pub shape: ShapeBody,
    pub constituents: Vec<Constituent>,
    #[serde(rename = "dependencyTree")]
    pub dependency_tree: Vec<DependencyNode>,
}

impl ShapeDocument {
    /// Documents a plain mesh; no constituents, no dependency tree.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            shape: ShapeBody::from(mesh),
            constituents: Vec::new(),
            dependency_tree: Vec::new(),
        }
    }

    /// Documents a snowflake: its derived mesh plus the dependency tree
    /// of everything it is composed from.
    pub fn from_snowflake(
        arena: &SnowflakeArena,
        root: SnowflakeId,
    ) -> Result<Self, ExportError> {
        Ok(Self {
            shape: ShapeBody::from(arena.flake(root).mesh()),
            constituents: Vec::new(),
            dependency_tree: arena.dependency_tree(root)?,
        })
    }

    /// Documents a star-convex shape: its mesh plus its decomposition
    /// into constituent primitives.
    pub fn from_star_convex(shape: &StarConvex) -> Result<Self, ExportError> {
        Ok(Self {
            shape: ShapeBody::from(shape.mesh()),
            constituents: shape.constituents()?,
            dependency_tree: Vec::new(),
        })
    }

    /// Prints the document as compact JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Prints the document as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
