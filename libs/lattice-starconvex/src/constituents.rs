//! # Constituent Decomposition
//!
//! Splits a star-convex shape into the primitives a renderer can draw
//! directly: per sector, one walk along the outer boundary, classifying
//! each corner as obtuse or acute by how many of the three forward
//! neighbors are connected. The corner sequence between two cuts fully
//! determines one constituent primitive and its dimensions.
//!
//! Constituent directions are expressed in half steps (twelve per turn)
//! to match the renderer's angle convention.

use crate::error::StarConvexError;
use crate::shape::StarConvex;
use config::constants::{DIRECTION_COUNT, HALF_STEP_SCALE};
use lattice_mesh::{direction_vector, GridPoint};
use serde::{Deserialize, Serialize};

/// The four primitive kinds a sector boundary decomposes into.
///
/// Serialized as the numeric codes the render layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ShapeType {
    Triangle,
    Parallelogram,
    Trapezoid,
    Pentagon,
}

impl From<ShapeType> for u8 {
    fn from(value: ShapeType) -> Self {
        match value {
            ShapeType::Triangle => 0,
            ShapeType::Parallelogram => 1,
            ShapeType::Trapezoid => 2,
            ShapeType::Pentagon => 3,
        }
    }
}

impl TryFrom<u8> for ShapeType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ShapeType::Triangle),
            1 => Ok(ShapeType::Parallelogram),
            2 => Ok(ShapeType::Trapezoid),
            3 => Ok(ShapeType::Pentagon),
            other => Err(format!("invalid shape type code {other}")),
        }
    }
}

/// One constituent primitive of a star-convex shape.
///
/// `direction_w` and `direction_h` are the primitive's two spanning
/// directions in half steps; the dimension fields `a`, `d`, `c`, `a2`,
/// `a3` are meaningful per [`ShapeType`], unused ones stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constituent {
    pub shape_type: ShapeType,
    pub direction_w: usize,
    pub direction_h: usize,
    pub a: i32,
    pub d: i32,
    pub c: i32,
    pub a2: i32,
    pub a3: i32,
}

impl Constituent {
    /// The degenerate parallelogram covering a bare axis line.
    fn line(sector: usize, length: i32) -> Self {
        Self {
            shape_type: ShapeType::Parallelogram,
            direction_w: sector * HALF_STEP_SCALE,
            direction_h: ((sector + 1) % DIRECTION_COUNT) * HALF_STEP_SCALE,
            a: length,
            d: 0,
            c: 0,
            a2: 0,
            a3: 0,
        }
    }

    /// Classifies one boundary segment from its recorded corner angles
    /// (0 obtuse, 1 acute) and distances.
    fn from_traversal(sector: usize, angles: &[i32], distances: &[i32]) -> Self {
        let mut direction_w = sector * HALF_STEP_SCALE;
        let mut direction_h = ((sector + 1) % DIRECTION_COUNT) * HALF_STEP_SCALE;
        let (shape_type, a, d, c, a2, a3);
        if angles[0] == 1 {
            if angles[1] == 1 {
                shape_type = ShapeType::Triangle;
                (a, d, c, a2, a3) = (distances[0], 0, 0, 0, 0);
            } else {
                shape_type = ShapeType::Trapezoid;
                (a, d, c, a2, a3) = (distances[0], distances[1], 0, 0, 0);
            }
        } else if angles[1] == 1 {
            shape_type = ShapeType::Parallelogram;
            (a, d, c, a2, a3) = (distances[0], distances[1], 0, 0, 0);
        } else if angles[2] == 1 {
            // Trapezoid leaning the other way: spans swap roles.
            shape_type = ShapeType::Trapezoid;
            (a, d, c, a2, a3) = (distances[0] + distances[1], distances[0], 0, 0, 0);
            std::mem::swap(&mut direction_w, &mut direction_h);
        } else {
            shape_type = ShapeType::Pentagon;
            a = distances[0];
            d = distances[1] + distances[2];
            c = distances[1];
            a2 = a + c;
            a3 = a + 1;
        }
        Self { shape_type, direction_w, direction_h, a, d, c, a2, a3 }
    }
}

impl StarConvex {
    /// Decomposes the shape into its constituent primitives, sector by
    /// sector in counterclockwise order.
    pub fn constituents(&self) -> Result<Vec<Constituent>, StarConvexError> {
        let mut result = Vec::new();
        for sector in 0..DIRECTION_COUNT {
            self.sector_constituents(sector, &mut result)?;
        }
        Ok(result)
    }

    fn sector_constituents(
        &self,
        sector: usize,
        out: &mut Vec<Constituent>,
    ) -> Result<(), StarConvexError> {
        let mesh = self.mesh();
        let vec1 = direction_vector(sector);
        let vec2 = direction_vector((sector + 1) % DIRECTION_COUNT);
        let vec3 = direction_vector((sector + 2) % DIRECTION_COUNT);
        let vec4 = direction_vector((sector + 3) % DIRECTION_COUNT);
        let unrotate = ((DIRECTION_COUNT - sector) % DIRECTION_COUNT) as i32;

        let connected = |from: usize, to: GridPoint| {
            mesh.node_index_local(to)
                .is_some_and(|i| mesh.contains_edge((from, i)))
        };

        // March the primary axis, tracking the last node with an edge to
        // the upper side. That is both the start of the boundary walk and
        // the line detector for this direction.
        let mut last_edge_idx = 0;
        let mut last_edge_found = false;
        let mut node = GridPoint::ORIGIN;
        let mut node_idx = 0;
        let mut nbr_top_1 = vec2;
        let mut nbr_top_2 = vec1 + vec2;
        let mut idx = 0;
        loop {
            node = node + vec1;
            let Some(i) = mesh.node_index_local(node) else {
                break;
            };
            node_idx = i;
            idx += 1;
            if !last_edge_found {
                if connected(node_idx, nbr_top_1) || connected(node_idx, nbr_top_2) {
                    last_edge_idx = idx;
                } else {
                    last_edge_found = true;
                }
            }
            nbr_top_1 = nbr_top_2;
            nbr_top_2 = nbr_top_1 + vec1;
        }
        let node_end = vec1 * idx;

        // An axis line sticking out past the last upper edge, with no
        // lower edge either, is its own degenerate constituent.
        if idx > last_edge_idx {
            let nbr_bot_1 = node_end - vec2;
            let nbr_bot_2 = nbr_bot_1 + vec1;
            if !connected(node_idx, nbr_bot_1) && !connected(node_idx, nbr_bot_2) {
                out.push(Constituent::line(sector, idx));
            }
        }

        let idx = last_edge_idx;
        if idx == 0 {
            return Ok(());
        }
        let mut node = vec1 * idx;
        let node_idx = mesh
            .node_index_local(node)
            .ok_or(StarConvexError::TraversalFailed { sector })?;

        // Walk the outer boundary from here to the next sector border.
        // Only three headings are possible; 0 and 1 turn left relative to
        // the previous heading, so corners show up as a drop or jump in
        // the number of connected forward neighbors.
        let directions = [vec2, vec3, vec4];
        let mut nbrs = [node + vec2, node + vec3, node + vec4];

        let (mut direction, angle) = if connected(node_idx, nbrs[0]) {
            (0, 0)
        } else if connected(node_idx, nbrs[1]) {
            (1, 1)
        } else {
            return Err(StarConvexError::TraversalFailed { sector });
        };

        let mut angles = vec![angle];
        let mut distances = vec![idx];
        let mut dist = 0;

        loop {
            let dir_vec = directions[direction];
            let new_node = node + dir_vec;
            dist += 1;

            // Sector border: cut the segment unless heading 2 already
            // closed the previous constituent.
            if new_node.rotated(unrotate).x <= 0 {
                if direction != 2 {
                    angles.push(1);
                    distances.push(dist);
                    out.push(Constituent::from_traversal(sector, &angles, &distances));
                }
                break;
            }

            let new_idx = mesh
                .node_index_local(new_node)
                .ok_or(StarConvexError::TraversalFailed { sector })?;
            let new_nbrs = [nbrs[0] + dir_vec, nbrs[1] + dir_vec, nbrs[2] + dir_vec];
            let num_nbrs = new_nbrs
                .iter()
                .filter(|&&n| connected(new_idx, n))
                .count();

            if direction == 0 && num_nbrs < 3 {
                if num_nbrs == 2 {
                    // Obtuse corner: keep walking on heading 1.
                    angles.push(0);
                    distances.push(dist);
                    dist = 0;
                    direction = 1;
                } else {
                    // Acute corner closes the constituent.
                    angles.push(1);
                    distances.push(dist);
                    dist = 0;
                    out.push(Constituent::from_traversal(sector, &angles, &distances));
                    angles.clear();
                    distances.clear();
                    direction = 2;
                }
            } else if direction == 1 && num_nbrs != 2 {
                angles.push(0);
                distances.push(dist);
                out.push(Constituent::from_traversal(sector, &angles, &distances));
                angles.clear();
                distances.clear();
                dist = 0;
                if num_nbrs < 2 {
                    // Obtuse corner: keep walking on heading 2.
                    direction = 2;
                } else {
                    // Inverted corner: the next constituent starts right
                    // here, spanning back to the primary axis.
                    angles.push(0);
                    let r = new_node.rotated(unrotate);
                    distances.push(r.x);
                    dist = r.y;
                    direction = 0;
                }
            } else if direction == 2 && num_nbrs > 1 {
                // Any corner on heading 2 starts a new constituent.
                angles.push(0);
                let r = new_node.rotated(unrotate);
                distances.push(r.x);
                dist = r.y;
                if num_nbrs == 2 {
                    angles.push(0);
                    distances.push(dist);
                    dist = 0;
                    direction = 1;
                } else {
                    direction = 0;
                }
            }

            node = new_node;
            nbrs = new_nbrs;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn test_empty_shape_has_no_constituents() {
        let shape = StarConvex::new(GridPoint::ORIGIN);
        assert_eq!(shape.constituents().unwrap(), Vec::new());
    }

    #[test]
    fn test_line_constituent() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(3, 0));
        assert_eq!(
            shape.constituents().unwrap(),
            vec![Constituent {
                shape_type: ShapeType::Parallelogram,
                direction_w: 0,
                direction_h: 2,
                a: 3,
                d: 0,
                c: 0,
                a2: 0,
                a3: 0,
            }]
        );
    }

    #[test]
    fn test_parallelogram_constituent() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(2, 1));
        assert_eq!(
            shape.constituents().unwrap(),
            vec![Constituent {
                shape_type: ShapeType::Parallelogram,
                direction_w: 0,
                direction_h: 2,
                a: 2,
                d: 1,
                c: 0,
                a2: 0,
                a3: 0,
            }]
        );
    }

    #[test]
    fn test_triangle_constituent() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_face_convex(p(0, 0), p(1, 0), p(0, 1));
        assert_eq!(
            shape.constituents().unwrap(),
            vec![Constituent {
                shape_type: ShapeType::Triangle,
                direction_w: 0,
                direction_h: 2,
                a: 1,
                d: 0,
                c: 0,
                a2: 0,
                a3: 0,
            }]
        );
    }

    #[test]
    fn test_large_triangle_constituent() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(3, 0));
        shape.add_edge_convex(p(3, 0), p(2, 1));
        shape.add_edge_convex(p(2, 1), p(1, 2));
        shape.add_edge_convex(p(1, 2), p(0, 3));
        let constituents = shape.constituents().unwrap();
        assert_eq!(constituents.len(), 1);
        assert_eq!(constituents[0].shape_type, ShapeType::Triangle);
        assert_eq!(constituents[0].a, 3);
    }

    #[test]
    fn test_trapezoid_constituent() {
        // Bottom row of three nodes, top row of two.
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(1, 1));
        shape.add_edge_convex(p(2, 0), p(1, 1));
        assert_eq!(
            shape.constituents().unwrap(),
            vec![Constituent {
                shape_type: ShapeType::Trapezoid,
                direction_w: 0,
                direction_h: 2,
                a: 2,
                d: 1,
                c: 0,
                a2: 0,
                a3: 0,
            }]
        );
    }

    #[test]
    fn test_inverted_trapezoid_constituent() {
        // Two-node rows at heights 0 and 1, single node at height 2: the
        // boundary leans against the secondary axis, so the spanning
        // directions swap.
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(1, 1));
        shape.add_edge_convex(p(1, 1), p(0, 2));
        assert_eq!(
            shape.constituents().unwrap(),
            vec![Constituent {
                shape_type: ShapeType::Trapezoid,
                direction_w: 2,
                direction_h: 0,
                a: 2,
                d: 1,
                c: 0,
                a2: 0,
                a3: 0,
            }]
        );
    }

    #[test]
    fn test_pentagon_constituent() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(2, 2));
        assert_eq!(
            shape.constituents().unwrap(),
            vec![Constituent {
                shape_type: ShapeType::Pentagon,
                direction_w: 0,
                direction_h: 2,
                a: 2,
                d: 2,
                c: 1,
                a2: 3,
                a3: 3,
            }]
        );
    }

    #[test]
    fn test_staircase_splits_into_parallelograms() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(2, 1));
        shape.add_node_convex(p(1, 2));
        let constituents = shape.constituents().unwrap();
        assert_eq!(constituents.len(), 2);
        assert!(constituents
            .iter()
            .all(|c| c.shape_type == ShapeType::Parallelogram));
        assert_eq!((constituents[0].a, constituents[0].d), (2, 1));
        assert_eq!((constituents[1].a, constituents[1].d), (1, 2));
    }

    #[test]
    fn test_detached_line_in_second_sector() {
        // A filled parallelogram plus a bare axis spur along direction 1
        // yields the parallelogram and a line constituent for the spur.
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        shape.add_node_convex(p(2, 1));
        shape.add_node_convex(p(0, 2));
        let constituents = shape.constituents().unwrap();
        assert_eq!(constituents.len(), 2);
        assert_eq!(constituents[0].shape_type, ShapeType::Parallelogram);
        assert_eq!(
            constituents[1],
            Constituent {
                shape_type: ShapeType::Parallelogram,
                direction_w: 2,
                direction_h: 4,
                a: 2,
                d: 0,
                c: 0,
                a2: 0,
                a3: 0,
            }
        );
    }

    #[test]
    fn test_constituents_cover_all_sectors() {
        let mut shape = StarConvex::new(GridPoint::ORIGIN);
        for direction in 0..DIRECTION_COUNT {
            shape.add_node_convex(direction_vector(direction) * 2);
        }
        let constituents = shape.constituents().unwrap();
        // Six bare axis lines, one per sector.
        assert_eq!(constituents.len(), 6);
        for (sector, constituent) in constituents.iter().enumerate() {
            assert_eq!(constituent.shape_type, ShapeType::Parallelogram);
            assert_eq!(constituent.direction_w, sector * 2);
            assert_eq!(constituent.a, 2);
        }
    }

    #[test]
    fn test_shape_type_codes() {
        assert_eq!(u8::from(ShapeType::Triangle), 0);
        assert_eq!(u8::from(ShapeType::Parallelogram), 1);
        assert_eq!(u8::from(ShapeType::Trapezoid), 2);
        assert_eq!(u8::from(ShapeType::Pentagon), 3);
        assert_eq!(ShapeType::try_from(3), Ok(ShapeType::Pentagon));
        assert!(ShapeType::try_from(4).is_err());
    }
}
