//! # Mesh Data Structure
//!
//! The editable node/edge/face graph of one shape on the triangular
//! lattice.
//!
//! Nodes are local grid coordinates relative to the mesh `position`; edges
//! and faces reference nodes by index. Index 0 is always the origin node
//! `(0, 0)` and can never be removed. Removals that would disconnect the
//! remaining graph are rejected as silent no-ops, as are all mutations on
//! absent targets.
//!
//! Membership tests and coordinate lookups are brute-force linear scans.
//! The meshes handled here are editor-scale (tens to hundreds of nodes);
//! bulk data is an explicit non-goal.

use crate::grid::GridPoint;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A mesh of nodes, edges and triangular faces on the triangular lattice.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::{GridPoint, Mesh};
///
/// let mut mesh = Mesh::new(GridPoint::ORIGIN);
/// let a = GridPoint::new(1, 0);
/// let b = GridPoint::new(0, 1);
/// mesh.add_face(GridPoint::ORIGIN, a, b);
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.edge_count(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    /// Grid position of the local origin in the shared global frame.
    position: GridPoint,
    /// Node coordinates relative to `position`; index 0 is the origin.
    nodes: Vec<GridPoint>,
    /// Unordered index pairs into `nodes`.
    edges: Vec<(usize, usize)>,
    /// Unordered index triples into `nodes`.
    faces: Vec<(usize, usize, usize)>,
}

impl Mesh {
    /// Creates a mesh containing only the origin node.
    pub fn new(position: GridPoint) -> Self {
        Self {
            position,
            nodes: vec![GridPoint::ORIGIN],
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Assembles a mesh from prebuilt parts.
    ///
    /// The caller guarantees consistency: unique node coordinates, valid
    /// indices, no duplicate edges or faces. Used by the snowflake overlay
    /// generator, which constructs all three lists together.
    pub fn from_parts(
        position: GridPoint,
        nodes: Vec<GridPoint>,
        edges: Vec<(usize, usize)>,
        faces: Vec<(usize, usize, usize)>,
    ) -> Self {
        Self { position, nodes, edges, faces }
    }

    /// Returns the global grid position of the local origin.
    #[inline]
    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// Moves the whole mesh by a grid delta.
    pub fn translate(&mut self, delta: GridPoint) {
        self.position = self.position + delta;
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the local node coordinates.
    #[inline]
    pub fn nodes(&self) -> &[GridPoint] {
        &self.nodes
    }

    /// Returns the edge index pairs.
    #[inline]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Returns the face index triples.
    #[inline]
    pub fn faces(&self) -> &[(usize, usize, usize)] {
        &self.faces
    }

    /// Converts a global coordinate into this mesh's local frame.
    #[inline]
    pub fn to_local(&self, p: GridPoint) -> GridPoint {
        p - self.position
    }

    /// Converts a local coordinate into the global frame.
    #[inline]
    pub fn to_global(&self, p: GridPoint) -> GridPoint {
        p + self.position
    }

    /// Returns the index of the node at the given local coordinate.
    pub fn node_index_local(&self, p: GridPoint) -> Option<usize> {
        self.nodes.iter().position(|&n| n == p)
    }

    /// Returns the index of the node at the given global coordinate.
    pub fn node_index(&self, p: GridPoint) -> Option<usize> {
        self.node_index_local(self.to_local(p))
    }

    /// Maps all nodes into the 2D planar embedding of the global frame.
    pub fn embedded_nodes(&self) -> Vec<DVec2> {
        self.nodes.iter().map(|&n| self.to_global(n).to_embedding()).collect()
    }

    /// Order-independent edge membership test by index pair.
    pub fn contains_edge(&self, (a, b): (usize, usize)) -> bool {
        self.edges.iter().any(|&(u, v)| (u, v) == (a, b) || (u, v) == (b, a))
    }

    /// Order-independent face membership test by index triple.
    pub fn contains_face(&self, face: (usize, usize, usize)) -> bool {
        let key = face_key(face);
        self.faces.iter().any(|&f| face_key(f) == key)
    }

    // =========================================================================
    // ADDITION
    // =========================================================================

    /// Adds the edge between two global coordinates.
    ///
    /// No-op if neither endpoint exists. If exactly one exists, the missing
    /// node is created first. Never creates a face.
    pub fn add_edge(&mut self, a: GridPoint, b: GridPoint) {
        self.add_edge_local(self.to_local(a), self.to_local(b));
    }

    /// Local-frame variant of [`Mesh::add_edge`].
    pub fn add_edge_local(&mut self, a: GridPoint, b: GridPoint) {
        let ia = self.node_index_local(a);
        let ib = self.node_index_local(b);
        match (ia, ib) {
            (None, None) => {}
            (Some(i), Some(j)) => {
                if !self.contains_edge((i, j)) {
                    self.edges.push((i, j));
                }
            }
            (Some(i), None) => {
                let j = self.push_node(b);
                self.edges.push((i, j));
            }
            (None, Some(j)) => {
                let i = self.push_node(a);
                self.edges.push((j, i));
            }
        }
    }

    /// Adds the face spanned by three global coordinates.
    ///
    /// No-op if none of the three nodes exists. Otherwise creates any
    /// missing nodes, then any missing edges, then the face itself.
    pub fn add_face(&mut self, a: GridPoint, b: GridPoint, c: GridPoint) {
        self.add_face_local(self.to_local(a), self.to_local(b), self.to_local(c));
    }

    /// Local-frame variant of [`Mesh::add_face`].
    pub fn add_face_local(&mut self, a: GridPoint, b: GridPoint, c: GridPoint) {
        let points = [a, b, c];
        if points.iter().all(|&p| self.node_index_local(p).is_none()) {
            return;
        }
        let mut resolved = [0usize; 3];
        for (slot, &point) in resolved.iter_mut().zip(&points) {
            *slot = match self.node_index_local(point) {
                Some(i) => i,
                None => self.push_node(point),
            };
        }
        let [i, j, k] = resolved;
        for edge in [(i, j), (i, k), (j, k)] {
            if !self.contains_edge(edge) {
                self.edges.push(edge);
            }
        }
        if !self.contains_face((i, j, k)) {
            self.faces.push((i, j, k));
        }
    }

    // =========================================================================
    // REMOVAL
    // =========================================================================

    /// Removes the node at a global coordinate with all incident edges and
    /// faces.
    ///
    /// No-op if the node is absent or is the origin. Aborts without
    /// mutation if the removal would disconnect the node's neighbors from
    /// each other.
    pub fn remove_node(&mut self, p: GridPoint) {
        let local = self.to_local(p);
        let Some(idx) = self.node_index_local(local) else {
            return;
        };
        if local == GridPoint::ORIGIN {
            return;
        }

        let mut incident_edges = Vec::new();
        let mut neighbors = Vec::new();
        for (j, &(a, b)) in self.edges.iter().enumerate() {
            if a == idx || b == idx {
                incident_edges.push(j);
                neighbors.push(if a == idx { b } else { a });
            }
        }

        if neighbors.len() > 1
            && !self.nodes_connected(neighbors[0], &neighbors[1..], &[idx], &incident_edges)
        {
            return;
        }

        let mut edge_idx = 0;
        self.edges.retain(|_| {
            let keep = !incident_edges.contains(&edge_idx);
            edge_idx += 1;
            keep
        });
        self.faces.retain(|&(a, b, c)| a != idx && b != idx && c != idx);
        self.remove_node_direct(idx);
    }

    /// Removes the edge between two global coordinates and any faces
    /// incident to both endpoints.
    ///
    /// No-op if either endpoint or the edge is absent. Aborts without
    /// mutation if the removal would disconnect the two endpoints.
    pub fn remove_edge(&mut self, a: GridPoint, b: GridPoint) {
        let (Some(i), Some(j)) = (self.node_index(a), self.node_index(b)) else {
            return;
        };
        let Some(edge_idx) = self
            .edges
            .iter()
            .position(|&(u, v)| (u, v) == (i, j) || (u, v) == (j, i))
        else {
            return;
        };
        if !self.nodes_connected(i, &[j], &[], &[edge_idx]) {
            return;
        }
        self.faces
            .retain(|&f| !(face_contains(f, i) && face_contains(f, j)));
        self.edges.remove(edge_idx);
    }

    /// Removes the face spanned by three global coordinates.
    ///
    /// No-op if the face is absent. Never removes nodes or edges.
    pub fn remove_face(&mut self, a: GridPoint, b: GridPoint, c: GridPoint) {
        let (Some(i), Some(j), Some(k)) =
            (self.node_index(a), self.node_index(b), self.node_index(c))
        else {
            return;
        };
        let key = face_key((i, j, k));
        if let Some(pos) = self.faces.iter().position(|&f| face_key(f) == key) {
            self.faces.remove(pos);
        }
    }

    // =========================================================================
    // MERGING
    // =========================================================================

    /// Imports another mesh's nodes, edges and faces into this one.
    ///
    /// The other mesh is rebased from its own position into this mesh's
    /// local frame. Nodes are deduplicated by coordinate; edges and faces
    /// are remapped through that substitution and added only if missing.
    /// Merging the same mesh twice adds nothing the second time.
    pub fn merge_with(&mut self, other: &Mesh) {
        let rebase = other.position - self.position;
        let mut index_map = Vec::with_capacity(other.nodes.len());
        for &node in &other.nodes {
            let local = node + rebase;
            let idx = match self.node_index_local(local) {
                Some(i) => i,
                None => self.push_node(local),
            };
            index_map.push(idx);
        }
        for &(a, b) in &other.edges {
            let edge = (index_map[a], index_map[b]);
            if !self.contains_edge(edge) {
                self.edges.push(edge);
            }
        }
        for &(a, b, c) in &other.faces {
            let face = (index_map[a], index_map[b], index_map[c]);
            if !self.contains_face(face) {
                self.faces.push(face);
            }
        }
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn push_node(&mut self, p: GridPoint) -> usize {
        self.nodes.push(p);
        self.nodes.len() - 1
    }

    /// Breadth-first reachability from `start` toward `targets`, ignoring
    /// the excluded nodes and edge indices. Returns whether every target
    /// was reached.
    fn nodes_connected(
        &self,
        start: usize,
        targets: &[usize],
        excluded_nodes: &[usize],
        excluded_edges: &[usize],
    ) -> bool {
        let mut remaining: Vec<usize> = targets.iter().copied().filter(|&t| t != start).collect();
        if remaining.is_empty() {
            return true;
        }
        let mut visited = vec![false; self.nodes.len()];
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(n) = queue.pop_front() {
            if remaining.is_empty() {
                break;
            }
            for (j, &(a, b)) in self.edges.iter().enumerate() {
                if excluded_edges.contains(&j) {
                    continue;
                }
                let nbr = if a == n {
                    b
                } else if b == n {
                    a
                } else {
                    continue;
                };
                if excluded_nodes.contains(&nbr) || visited[nbr] {
                    continue;
                }
                remaining.retain(|&t| t != nbr);
                visited[nbr] = true;
                queue.push_back(nbr);
            }
        }
        remaining.is_empty()
    }

    /// Deletes the node at `idx` and re-bases all surviving edge and face
    /// indices above it. Incident edges and faces must already be gone.
    fn remove_node_direct(&mut self, idx: usize) {
        for (a, b) in &mut self.edges {
            if *a >= idx {
                *a -= 1;
            }
            if *b >= idx {
                *b -= 1;
            }
        }
        for (a, b, c) in &mut self.faces {
            if *a >= idx {
                *a -= 1;
            }
            if *b >= idx {
                *b -= 1;
            }
            if *c >= idx {
                *c -= 1;
            }
        }
        self.nodes.remove(idx);
    }
}

fn face_key((a, b, c): (usize, usize, usize)) -> (usize, usize, usize) {
    let mut key = [a, b, c];
    key.sort_unstable();
    (key[0], key[1], key[2])
}

fn face_contains((a, b, c): (usize, usize, usize), idx: usize) -> bool {
    a == idx || b == idx || c == idx
}
