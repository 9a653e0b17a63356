//! # Picked Elements
//!
//! The contract between the interaction layer and the core: a resolved
//! screen pick arrives as a tagged node, edge or face value in global
//! lattice coordinates. Mesh membership is never presupposed — the
//! interaction layer routinely probes elements that do not exist yet.

use crate::grid::GridPoint;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// A grid element resolved from a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickedElement {
    /// A single lattice node.
    Node(GridPoint),
    /// An unordered pair of adjacent lattice nodes.
    Edge(GridPoint, GridPoint),
    /// An unordered triple of mutually adjacent lattice nodes.
    Face(GridPoint, GridPoint, GridPoint),
}

impl Mesh {
    /// Adds the picked element to the mesh.
    ///
    /// Edges and faces are added through [`Mesh::add_edge`] and
    /// [`Mesh::add_face`]; a bare node pick adds nothing, since free
    /// mesh editing only ever grows along existing structure.
    pub fn add_element(&mut self, element: &PickedElement) {
        match *element {
            PickedElement::Node(_) => {}
            PickedElement::Edge(a, b) => self.add_edge(a, b),
            PickedElement::Face(a, b, c) => self.add_face(a, b, c),
        }
    }

    /// Removes the picked element from the mesh.
    pub fn remove_element(&mut self, element: &PickedElement) {
        match *element {
            PickedElement::Node(p) => self.remove_node(p),
            PickedElement::Edge(a, b) => self.remove_edge(a, b),
            PickedElement::Face(a, b, c) => self.remove_face(a, b, c),
        }
    }
}
