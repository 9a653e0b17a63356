//! # Snowflake State
//!
//! One snowflake: its derived mesh, the six arm lengths, the per-direction
//! child attachments and the non-owning parent back-references.
//!
//! The mesh is a cache. Arms and attachments are the authoritative state;
//! [`crate::arena::SnowflakeArena::recalculate_shape`] reconciles the two.

use crate::arena::SnowflakeId;
use config::constants::DIRECTION_COUNT;
use lattice_mesh::{direction_vector, GridPoint, Mesh};
use std::collections::BTreeSet;

/// One child overlay recorded on a parent's arm.
///
/// At arm distance `distance` along the direction it is stored under, a
/// copy of `child`'s mesh is overlaid, rotated by `rotation` steps and
/// shifted one lattice unit further along the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    /// Arm distance of the inner anchor node, measured from the origin.
    pub distance: i32,
    /// Rotation of the child copy in 60 degree steps (0..6).
    pub rotation: u8,
    /// Handle of the attached snowflake.
    pub child: SnowflakeId,
}

/// A snowflake shape: a mesh derived from arms and child attachments.
#[derive(Debug, Clone)]
pub struct Snowflake {
    mesh: Mesh,
    /// Length of the straight chain in each of the six directions.
    arms: [i32; DIRECTION_COUNT],
    /// Child attachments per direction.
    children: [Vec<Attachment>; DIRECTION_COUNT],
    /// Snowflakes that attach this one as a child. Non-owning; maintained
    /// for re-derivation and cycle detection only.
    parents: BTreeSet<SnowflakeId>,
}

impl Snowflake {
    /// Creates a snowflake containing only its origin node.
    pub fn new(position: GridPoint) -> Self {
        Self {
            mesh: Mesh::new(position),
            arms: [0; DIRECTION_COUNT],
            children: Default::default(),
            parents: BTreeSet::new(),
        }
    }

    /// Returns the derived mesh.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns the derived mesh for mutation.
    #[inline]
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// Returns the global position of the snowflake origin.
    #[inline]
    pub fn position(&self) -> GridPoint {
        self.mesh.position()
    }

    /// Returns the six arm lengths.
    #[inline]
    pub fn arms(&self) -> &[i32; DIRECTION_COUNT] {
        &self.arms
    }

    /// Returns the attachments recorded for one direction.
    #[inline]
    pub fn children(&self, direction: usize) -> &[Attachment] {
        &self.children[direction]
    }

    /// Returns the parent back-reference set.
    #[inline]
    pub fn parents(&self) -> &BTreeSet<SnowflakeId> {
        &self.parents
    }

    /// Returns the set of directly attached child handles.
    pub fn child_ids(&self) -> BTreeSet<SnowflakeId> {
        self.children
            .iter()
            .flatten()
            .map(|attachment| attachment.child)
            .collect()
    }

    // =========================================================================
    // ARMS
    // =========================================================================

    /// Tests whether a global coordinate lies on one of the six axial rays
    /// from the origin; returns `(direction, distance)` if it does.
    ///
    /// The origin itself reports direction 0 at distance 0.
    pub fn arm_hit(&self, p: GridPoint) -> Option<(usize, i32)> {
        let p = self.mesh.to_local(p);
        if p.y == 0 {
            Some((if p.x >= 0 { 0 } else { 3 }, p.x.abs()))
        } else if p.x == 0 {
            Some((if p.y >= 0 { 1 } else { 4 }, p.y.abs()))
        } else if p.x + p.y == 0 {
            Some((if p.y >= 0 { 2 } else { 5 }, p.x.abs()))
        } else {
            None
        }
    }

    /// Grows one arm to the given length, appending the missing chain
    /// nodes and edges. No-op when the arm is already at least that long.
    pub fn extend_arm(&mut self, direction: usize, length: i32) {
        let vec = direction_vector(direction);
        for dist in (self.arms[direction] + 1)..=length {
            self.mesh.add_edge_local(vec * (dist - 1), vec * dist);
        }
        if length > self.arms[direction] {
            self.arms[direction] = length;
        }
    }

    /// Sets one arm length without touching the mesh.
    ///
    /// Callers re-derive the mesh afterwards; this only records the
    /// authoritative length (arm-tip removal shrinks it by one).
    pub(crate) fn set_arm(&mut self, direction: usize, length: i32) {
        self.arms[direction] = length;
    }

    /// Resets the mesh and rebuilds the six arm chains from `arms`.
    ///
    /// The child overlays are merged on top by the arena's re-derivation.
    pub(crate) fn rebuild_from_arms(&mut self) {
        self.mesh = Mesh::new(self.mesh.position());
        for direction in 0..DIRECTION_COUNT {
            let vec = direction_vector(direction);
            for dist in 1..=self.arms[direction] {
                self.mesh.add_edge_local(vec * (dist - 1), vec * dist);
            }
        }
    }

    /// Refreshes the arm lengths from the mesh by forward scan.
    ///
    /// Follows each axial chain node by node while both the next node and
    /// its connecting edge exist. Merging only adds structure, so the scan
    /// only ever extends the recorded lengths.
    pub fn refresh_arms(&mut self) {
        for direction in 0..DIRECTION_COUNT {
            let vec = direction_vector(direction);
            let mut dist = 0;
            let mut prev = 0;
            loop {
                let Some(next) = self.mesh.node_index_local(vec * (dist + 1)) else {
                    break;
                };
                if !self.mesh.contains_edge((prev, next)) {
                    break;
                }
                prev = next;
                dist += 1;
            }
            self.arms[direction] = dist;
        }
    }

    // =========================================================================
    // ATTACHMENTS
    // =========================================================================

    /// Records an attachment unless an identical one already exists.
    /// Returns whether it was added.
    pub(crate) fn add_attachment(&mut self, direction: usize, attachment: Attachment) -> bool {
        if self.children[direction].contains(&attachment) {
            return false;
        }
        self.children[direction].push(attachment);
        true
    }

    /// Drops all attachments anchored at one distance along one direction;
    /// returns the child handles that lost an attachment.
    pub(crate) fn remove_attachments_at(
        &mut self,
        direction: usize,
        distance: i32,
    ) -> BTreeSet<SnowflakeId> {
        let mut removed = BTreeSet::new();
        self.children[direction].retain(|attachment| {
            if attachment.distance == distance {
                removed.insert(attachment.child);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Drops every attachment referencing the given child.
    pub(crate) fn remove_child_everywhere(&mut self, child: SnowflakeId) {
        for list in &mut self.children {
            list.retain(|attachment| attachment.child != child);
        }
    }

    /// Whether any attachment still references the given child.
    pub(crate) fn references_child(&self, child: SnowflakeId) -> bool {
        self.children
            .iter()
            .flatten()
            .any(|attachment| attachment.child == child)
    }

    pub(crate) fn add_parent(&mut self, parent: SnowflakeId) {
        self.parents.insert(parent);
    }

    pub(crate) fn remove_parent(&mut self, parent: SnowflakeId) {
        self.parents.remove(&parent);
    }
}
