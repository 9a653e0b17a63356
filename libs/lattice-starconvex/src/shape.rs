//! # Star-Convex Shape
//!
//! The growth side of the invariant: instead of adding a clicked element
//! verbatim, every convex mutation first spans the parallelogram between
//! the origin and each touched node, filling all nodes, edges and faces
//! inside it. Whatever sequence of convex mutations is applied, the shape
//! therefore remains star-convex around its origin.

use config::constants::DIRECTION_COUNT;
use lattice_mesh::{direction_vector, GridPoint, Mesh, PickedElement};

/// Determines which of the six sectors a nonzero local point falls in.
///
/// Sector `k` is the half-open wedge between direction `k` (inclusive)
/// and direction `k + 1` (exclusive).
pub(crate) fn sector_of(p: GridPoint) -> usize {
    if p.x > 0 && p.y >= 0 {
        0
    } else if p.x <= 0 && p.y > 0 && p.x + p.y > 0 {
        1
    } else if p.x <= 0 && p.y > 0 && p.x + p.y <= 0 {
        2
    } else if p.y <= 0 && p.x < 0 {
        3
    } else if p.x >= 0 && p.y < 0 && p.x + p.y < 0 {
        4
    } else {
        5
    }
}

/// A mesh kept star-convex around its origin by construction.
#[derive(Debug, Clone)]
pub struct StarConvex {
    mesh: Mesh,
}

impl StarConvex {
    /// Creates a star-convex shape containing only its origin node.
    pub fn new(position: GridPoint) -> Self {
        Self { mesh: Mesh::new(position) }
    }

    /// Returns the underlying mesh.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns the global position of the shape origin.
    #[inline]
    pub fn position(&self) -> GridPoint {
        self.mesh.position()
    }

    /// Adds a node and fills the whole parallelogram it spans with the
    /// origin: all nodes, edges and faces between the two sector
    /// directions enclosing the new node.
    pub fn add_node_convex(&mut self, node: GridPoint) {
        let local = self.mesh.to_local(node);
        if self.mesh.node_index_local(local).is_some() {
            return;
        }

        let sector = sector_of(local);
        // Rotate into sector 0 to read off the two span distances.
        let rotated = local.rotated(((DIRECTION_COUNT - sector) % DIRECTION_COUNT) as i32);
        let dist1 = rotated.x;
        let dist2 = rotated.y;
        let dir1 = direction_vector(sector);
        let dir2 = direction_vector((sector + 1) % DIRECTION_COUNT);

        for ix in 0..=dist1 {
            let mut cell = dir1 * ix;
            for iy in 0..=dist2 {
                // Capture neighbor presence before mutating the mesh.
                let nbr_down = (iy > 0)
                    .then(|| cell - dir2)
                    .filter(|&n| self.mesh.node_index_local(n).is_some());
                let nbr_left = (ix > 0)
                    .then(|| cell - dir1)
                    .filter(|&n| self.mesh.node_index_local(n).is_some());
                let nbr_up = (ix > 0 && iy < dist2)
                    .then(|| cell - dir1 + dir2)
                    .filter(|&n| self.mesh.node_index_local(n).is_some());

                if let Some(down) = nbr_down {
                    self.mesh.add_edge_local(down, cell);
                }
                if let Some(left) = nbr_left {
                    self.mesh.add_edge_local(left, cell);
                }
                if let Some(up) = nbr_up {
                    self.mesh.add_edge_local(up, cell);
                }
                if let (Some(left), Some(down)) = (nbr_left, nbr_down) {
                    self.mesh.add_face_local(left, down, cell);
                }
                if let (Some(left), Some(up)) = (nbr_left, nbr_up) {
                    self.mesh.add_face_local(left, cell, up);
                }

                cell = cell + dir2;
            }
        }
    }

    /// Adds an edge between two adjacent nodes, spanning both endpoint
    /// parallelograms first. A missing edge is completed into a face with
    /// whichever of its two flanking nodes the shape already contains.
    pub fn add_edge_convex(&mut self, a: GridPoint, b: GridPoint) {
        self.add_node_convex(a);
        self.add_node_convex(b);

        let la = self.mesh.to_local(a);
        let lb = self.mesh.to_local(b);
        let (Some(ia), Some(ib)) = (self.mesh.node_index_local(la), self.mesh.node_index_local(lb))
        else {
            return;
        };
        if self.mesh.contains_edge((ia, ib)) {
            return;
        }

        let vec = lb - la;
        let left = la + vec.rotated(1);
        let right = la + vec.rotated(5);
        let third = if self.mesh.node_index_local(left).is_some() { left } else { right };
        self.mesh.add_face_local(la, lb, third);
    }

    /// Adds a face by adding its three edges convexly.
    pub fn add_face_convex(&mut self, a: GridPoint, b: GridPoint, c: GridPoint) {
        self.add_edge_convex(a, b);
        self.add_edge_convex(a, c);
        self.add_edge_convex(b, c);
    }

    /// Routes a picked element through the convex mutation that matches
    /// its kind.
    pub fn add_element_convex(&mut self, element: &PickedElement) {
        match *element {
            PickedElement::Node(p) => self.add_node_convex(p),
            PickedElement::Edge(a, b) => self.add_edge_convex(a, b),
            PickedElement::Face(a, b, c) => self.add_face_convex(a, b, c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn test_sector_assignment() {
        assert_eq!(sector_of(p(2, 1)), 0);
        assert_eq!(sector_of(p(1, 0)), 0);
        assert_eq!(sector_of(p(-1, 2)), 1);
        assert_eq!(sector_of(p(0, 1)), 1);
        assert_eq!(sector_of(p(-2, 1)), 2);
        assert_eq!(sector_of(p(-1, 1)), 2);
        assert_eq!(sector_of(p(-1, 0)), 3);
        assert_eq!(sector_of(p(-1, -1)), 3);
        assert_eq!(sector_of(p(1, -2)), 4);
        assert_eq!(sector_of(p(0, -1)), 4);
        assert_eq!(sector_of(p(2, -1)), 5);
        assert_eq!(sector_of(p(1, -1)), 5);
    }

    #[test]
    fn test_add_node_fills_parallelogram() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(2, 1));
        // A 3x2 block of nodes with all edges and faces.
        assert_eq!(shape.mesh().node_count(), 6);
        assert_eq!(shape.mesh().edge_count(), 9);
        assert_eq!(shape.mesh().face_count(), 4);
        // Idempotent on a contained node.
        shape.add_node_convex(p(1, 1));
        assert_eq!(shape.mesh().node_count(), 6);
    }

    #[test]
    fn test_add_node_on_axis_fills_line() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(3, 0));
        assert_eq!(shape.mesh().node_count(), 4);
        assert_eq!(shape.mesh().edge_count(), 3);
        assert_eq!(shape.mesh().face_count(), 0);
    }

    #[test]
    fn test_add_node_other_sector() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        // (-3, 2) sits in sector 2 at spans 2 and 1.
        shape.add_node_convex(p(-3, 2));
        assert_eq!(shape.mesh().node_count(), 6);
        assert_eq!(shape.mesh().edge_count(), 9);
        assert_eq!(shape.mesh().face_count(), 4);
        assert!(shape.mesh().node_index_local(p(-2, 1)).is_some());
        assert!(shape.mesh().node_index_local(p(-2, 2)).is_some());
    }

    #[test]
    fn test_add_node_respects_position() {
        let mut shape = StarConvex::new(p(10, -5));
        shape.add_node_convex(p(12, -4));
        assert_eq!(shape.mesh().node_count(), 6);
        assert!(shape.mesh().node_index(p(12, -4)).is_some());
    }

    #[test]
    fn test_add_edge_completes_face() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_edge_convex(p(1, 0), p(0, 1));
        // Two axis lines plus the closing edge and its face.
        assert_eq!(shape.mesh().node_count(), 3);
        assert_eq!(shape.mesh().edge_count(), 3);
        assert_eq!(shape.mesh().face_count(), 1);
        // Re-adding the now present edge changes nothing.
        shape.add_edge_convex(p(1, 0), p(0, 1));
        assert_eq!(shape.mesh().face_count(), 1);
    }

    #[test]
    fn test_add_face_spans_all_corners() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_face_convex(p(2, 0), p(1, 1), p(2, 1));
        // Parallelogram to (2, 1) already covers all three corners.
        assert_eq!(shape.mesh().node_count(), 6);
        assert_eq!(shape.mesh().edge_count(), 9);
        assert_eq!(shape.mesh().face_count(), 4);
    }

    #[test]
    fn test_element_dispatch() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_element_convex(&PickedElement::Node(p(1, 1)));
        assert_eq!(shape.mesh().node_count(), 4);
        shape.add_element_convex(&PickedElement::Edge(p(2, 0), p(1, 1)));
        assert!(shape.mesh().node_index_local(p(2, 0)).is_some());
    }
}
