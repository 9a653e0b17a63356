//! # Shifted Shape Generation
//!
//! The geometric primitive behind child previews and merges: a rotated
//! copy of a mesh, extended by one lattice step in a shift direction.
//!
//! Every node lacking a neighbor in the shift direction gains a shifted
//! node and a connecting edge. Every edge not parallel to the shift
//! direction spans a parallelogram: its shifted copy, a diagonal, and the
//! two triangular faces — each added only if not already implied by the
//! existing structure, so overlays meet shared boundaries without
//! duplicates.

use config::constants::DIRECTION_COUNT;
use lattice_mesh::{direction_vector, GridPoint, Mesh};

/// Produces a new, independent mesh equal to `source` rotated by
/// `rotation` steps and extended one lattice unit in `shift_direction`,
/// positioned at `position`.
pub fn shifted_mesh(
    source: &Mesh,
    position: GridPoint,
    rotation: u8,
    shift_direction: usize,
) -> Mesh {
    let mut nodes: Vec<GridPoint> = source.nodes().to_vec();
    let edges: Vec<(usize, usize)> = source.edges().to_vec();
    let faces: Vec<(usize, usize, usize)> = source.faces().to_vec();

    if rotation > 0 {
        for node in &mut nodes {
            *node = node.rotated(rotation as i32);
        }
    }

    let shift = direction_vector(shift_direction);

    // Shift pass: give every node a counterpart one step along the shift
    // direction, creating the node and/or the connecting edge as needed.
    let mut all_nodes = nodes.clone();
    let mut shift_map = vec![0usize; nodes.len()];
    let mut shifted_edges: Vec<(usize, usize)> = Vec::new();
    for i in 0..nodes.len() {
        let target = nodes[i] + shift;
        match nodes.iter().position(|&n| n == target) {
            Some(j) => {
                shift_map[i] = j;
                if !edge_present(&edges, (i, j)) {
                    shifted_edges.push((i, j));
                }
            }
            None => {
                all_nodes.push(target);
                let j = all_nodes.len() - 1;
                shift_map[i] = j;
                shifted_edges.push((i, j));
            }
        }
    }

    // Parallelogram pass over the original edges.
    let mut add_edges: Vec<(usize, usize)> = Vec::new();
    let mut add_faces: Vec<(usize, usize, usize)> = Vec::new();
    for &(a, b) in &edges {
        let delta = all_nodes[b] - all_nodes[a];
        let Some(direction) = delta.direction_index() else {
            // Arms and merges only ever produce unit lattice edges.
            continue;
        };
        if direction == shift_direction || (direction + 3) % DIRECTION_COUNT == shift_direction {
            continue;
        }

        let i = shift_map[a];
        let j = shift_map[b];

        // The shifted copy of this edge.
        let have_shifted = edge_present(&edges, (i, j))
            || edge_present(&shifted_edges, (i, j))
            || edge_present(&add_edges, (i, j));
        if !have_shifted {
            add_edges.push((i, j));
        }

        // The diagonal runs along whichever of the two cross connections
        // is a unit step, and the two faces complete the parallelogram.
        let to_shifted_b = (all_nodes[b] + shift) - all_nodes[a];
        let (diagonal, face_1, face_2) = if to_shifted_b.direction_index().is_some() {
            ((a, j), (a, j, b), (a, j, i))
        } else {
            ((b, i), (b, i, a), (b, i, j))
        };

        let have_diagonal = edge_present(&edges, diagonal) || edge_present(&add_edges, diagonal);
        if !have_diagonal {
            add_edges.push(diagonal);
        }
        let mut have_face_1 = false;
        let mut have_face_2 = false;
        if have_diagonal {
            // Only a pre-existing diagonal can come with pre-existing faces.
            for &face in faces.iter().chain(add_faces.iter()) {
                have_face_1 |= same_face(face, face_1);
                have_face_2 |= same_face(face, face_2);
                if have_face_1 && have_face_2 {
                    break;
                }
            }
        }
        if !have_face_1 {
            add_faces.push(face_1);
        }
        if !have_face_2 {
            add_faces.push(face_2);
        }
    }

    let mut out_edges = edges;
    out_edges.extend(shifted_edges);
    out_edges.extend(add_edges);
    let mut out_faces = faces;
    out_faces.extend(add_faces);
    Mesh::from_parts(position, all_nodes, out_edges, out_faces)
}

fn edge_present(edges: &[(usize, usize)], (a, b): (usize, usize)) -> bool {
    edges.iter().any(|&(u, v)| (u, v) == (a, b) || (u, v) == (b, a))
}

fn same_face(f: (usize, usize, usize), g: (usize, usize, usize)) -> bool {
    let mut f = [f.0, f.1, f.2];
    let mut g = [g.0, g.1, g.2];
    f.sort_unstable();
    g.sort_unstable();
    f == g
}
