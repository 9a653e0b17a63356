//! # Snowflake Arena
//!
//! Storage and dependency management for a collection of snowflakes.
//!
//! Snowflakes reference each other as parents and children, so they live
//! in an arena addressed by stable handles instead of owning each other;
//! cycle checks, re-derivation and topological ordering all traverse via
//! handles. Slots are never reused — a removed snowflake leaves a dead
//! slot behind, keeping every outstanding handle unambiguous.

use crate::error::SnowflakeError;
use crate::flake::{Attachment, Snowflake};
use crate::shift::shifted_mesh;
use config::constants::DIRECTION_COUNT;
use lattice_mesh::{direction_vector, GridPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable handle of a snowflake within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId(usize);

impl SnowflakeId {
    #[cfg(test)]
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }
}

/// One entry of the exported dependency tree.
///
/// Entries appear in child-first topological order; child references
/// resolve against positions in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// Arm lengths of this snowflake in the six directions.
    pub arms: [i32; DIRECTION_COUNT],
    /// Attachments of this snowflake, children resolved by tree index.
    pub children: Vec<AttachmentRef>,
}

/// One attachment within a [`DependencyNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRef {
    /// Index of the child within the dependency tree ordering.
    pub child_index: usize,
    /// Arm direction the child is attached under.
    pub direction: usize,
    /// Arm distance of the attachment anchor.
    pub distance: i32,
    /// Rotation of the child copy in 60 degree steps.
    pub rotation: u8,
}

/// Arena of snowflakes forming a dependency DAG.
#[derive(Debug, Clone, Default)]
pub struct SnowflakeArena {
    slots: Vec<Option<Snowflake>>,
}

impl SnowflakeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh single-origin snowflake at the given position.
    pub fn insert(&mut self, position: GridPoint) -> SnowflakeId {
        self.slots.push(Some(Snowflake::new(position)));
        SnowflakeId(self.slots.len() - 1)
    }

    /// Returns the snowflake behind a handle, if still alive.
    pub fn get(&self, id: SnowflakeId) -> Option<&Snowflake> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable variant of [`SnowflakeArena::get`].
    pub fn get_mut(&mut self, id: SnowflakeId) -> Option<&mut Snowflake> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns the snowflake behind a handle.
    ///
    /// # Panics
    ///
    /// Panics on a dead handle; handles are only ever handed out by this
    /// arena and stay valid until [`SnowflakeArena::remove`].
    pub fn flake(&self, id: SnowflakeId) -> &Snowflake {
        self.slots[id.0].as_ref().expect("dead snowflake handle")
    }

    /// Mutable variant of [`SnowflakeArena::flake`].
    pub fn flake_mut(&mut self, id: SnowflakeId) -> &mut Snowflake {
        self.slots[id.0].as_mut().expect("dead snowflake handle")
    }

    /// Iterates the live handles in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = SnowflakeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| SnowflakeId(i))
    }

    /// Finds the live snowflake whose origin sits at a global position.
    pub fn find_at(&self, position: GridPoint) -> Option<SnowflakeId> {
        self.ids().find(|&id| self.flake(id).position() == position)
    }

    // =========================================================================
    // DAG QUERIES
    // =========================================================================

    /// The set of all transitive children of a snowflake.
    pub fn children_recursive(&self, id: SnowflakeId) -> BTreeSet<SnowflakeId> {
        let mut result = BTreeSet::new();
        let mut worklist: Vec<SnowflakeId> = self.flake(id).child_ids().into_iter().collect();
        while let Some(next) = worklist.pop() {
            if result.insert(next) {
                worklist.extend(self.flake(next).child_ids());
            }
        }
        result
    }

    /// The set of all transitive parents of a snowflake.
    pub fn parents_recursive(&self, id: SnowflakeId) -> BTreeSet<SnowflakeId> {
        let mut result = BTreeSet::new();
        let mut worklist: Vec<SnowflakeId> = self.flake(id).parents().iter().copied().collect();
        while let Some(next) = worklist.pop() {
            if result.insert(next) {
                worklist.extend(self.flake(next).parents().iter().copied());
            }
        }
        result
    }

    /// Whether attaching `candidate` under `parent` would close a cycle,
    /// i.e. `parent` already transitively depends on `candidate`.
    pub fn would_cycle(&self, parent: SnowflakeId, candidate: SnowflakeId) -> bool {
        parent == candidate || self.children_recursive(candidate).contains(&parent)
    }

    /// Records a child attachment, registering the parent back-reference.
    ///
    /// Rejected (returning `false`, both snowflakes unmodified) when the
    /// attachment would close a dependency cycle; duplicate attachments
    /// are also ignored. The caller re-derives the parent afterwards.
    pub fn attach(
        &mut self,
        parent: SnowflakeId,
        direction: usize,
        attachment: Attachment,
    ) -> bool {
        if self.would_cycle(parent, attachment.child) {
            return false;
        }
        if !self.flake_mut(parent).add_attachment(direction, attachment) {
            return false;
        }
        self.flake_mut(attachment.child).add_parent(parent);
        true
    }

    /// Drops all attachments anchored at one distance along one direction,
    /// clearing parent back-references of children that lost their last
    /// attachment to this snowflake. Returns whether anything changed.
    pub fn detach_at(&mut self, id: SnowflakeId, direction: usize, distance: i32) -> bool {
        let removed = self.flake_mut(id).remove_attachments_at(direction, distance);
        for child in &removed {
            if !self.flake(id).references_child(*child) {
                self.flake_mut(*child).remove_parent(id);
            }
        }
        !removed.is_empty()
    }

    /// Destroys a snowflake: detaches it from all children and parents,
    /// re-derives the affected ancestors, then frees the slot.
    pub fn remove(&mut self, id: SnowflakeId) -> Result<(), SnowflakeError> {
        for child in self.flake(id).child_ids() {
            self.flake_mut(child).remove_parent(id);
        }
        let parents: Vec<SnowflakeId> = self.flake(id).parents().iter().copied().collect();
        for parent in parents {
            self.flake_mut(parent).remove_child_everywhere(id);
        }
        self.recalculate_ancestors(id)?;
        self.slots[id.0] = None;
        Ok(())
    }

    // =========================================================================
    // RE-DERIVATION
    // =========================================================================

    /// Rebuilds a snowflake's mesh from its arms and child attachments.
    ///
    /// The single source of truth reconciling structural state with the
    /// derived mesh: arm chains first, then every child overlay merged in
    /// at its anchor, refreshing the arm lengths after each merge.
    pub fn recalculate_shape(&mut self, id: SnowflakeId) {
        self.flake_mut(id).rebuild_from_arms();
        for direction in 0..DIRECTION_COUNT {
            let attachments: Vec<Attachment> = self.flake(id).children(direction).to_vec();
            for attachment in attachments {
                let anchor = self.flake(id).position()
                    + direction_vector(direction) * attachment.distance;
                let overlay = shifted_mesh(
                    self.flake(attachment.child).mesh(),
                    anchor,
                    attachment.rotation,
                    direction,
                );
                let flake = self.flake_mut(id);
                flake.mesh_mut().merge_with(&overlay);
                flake.refresh_arms();
            }
        }
    }

    /// Re-derives every transitive parent of a snowflake, descendants
    /// before ancestors.
    ///
    /// Works through a snapshot of the affected parent set: repeatedly
    /// recomputes a parent whose transitive children are disjoint from the
    /// still-pending set. Getting stuck means the relation is cyclic,
    /// which the insertion-time check rules out.
    pub fn recalculate_ancestors(&mut self, id: SnowflakeId) -> Result<(), SnowflakeError> {
        let mut pending = self.parents_recursive(id);
        while !pending.is_empty() {
            let next = pending
                .iter()
                .copied()
                .find(|&parent| self.children_recursive(parent).is_disjoint(&pending))
                .ok_or(SnowflakeError::DependencyCycle)?;
            pending.remove(&next);
            self.recalculate_shape(next);
        }
        Ok(())
    }

    // =========================================================================
    // DEPENDENCY TREE
    // =========================================================================

    /// Serializes a snowflake and all of its transitive descendants into a
    /// child-first topological ordering.
    ///
    /// Every snowflake appears only after all of its own children; child
    /// references are indices into the returned ordering. Candidates are
    /// taken in ascending handle order, so the output is deterministic.
    pub fn dependency_tree(
        &self,
        root: SnowflakeId,
    ) -> Result<Vec<DependencyNode>, SnowflakeError> {
        let mut remaining = self.children_recursive(root);
        remaining.insert(root);
        let mut order: Vec<SnowflakeId> = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let next = remaining
                .iter()
                .copied()
                .find(|&candidate| {
                    self.children_recursive(candidate)
                        .iter()
                        .all(|child| order.contains(child))
                })
                .ok_or(SnowflakeError::DependencyCycle)?;
            order.push(next);
            remaining.remove(&next);
        }

        let mut tree = Vec::with_capacity(order.len());
        for &id in &order {
            let flake = self.flake(id);
            let mut children = Vec::new();
            for direction in 0..DIRECTION_COUNT {
                for attachment in flake.children(direction) {
                    let child_index = order
                        .iter()
                        .position(|&entry| entry == attachment.child)
                        .ok_or(SnowflakeError::DependencyCycle)?;
                    children.push(AttachmentRef {
                        child_index,
                        direction,
                        distance: attachment.distance,
                        rotation: attachment.rotation,
                    });
                }
            }
            tree.push(DependencyNode { arms: *flake.arms(), children });
        }
        Ok(tree)
    }
}
