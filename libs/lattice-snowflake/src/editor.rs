//! # Snowflake Editor
//!
//! The interaction state machine of the snowflake workflow: which
//! snowflake is selected, which arm edge is marked as an attachment slot,
//! which other snowflake is staged as a child candidate and at what
//! rotation, plus the preview overlay derived from those three.
//!
//! Clicks arrive as resolved [`PickedElement`] values; every handler
//! returns whether it consumed the click, and invalid interactions leave
//! all state untouched.

use crate::arena::{SnowflakeArena, SnowflakeId};
use crate::error::SnowflakeError;
use crate::flake::Attachment;
use crate::shift::shifted_mesh;
use lattice_mesh::{direction_vector, GridPoint, Mesh, PickedElement};

/// An arm segment marked as the attachment slot, identified by its
/// direction and the arm distance of its inner endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmEdge {
    pub direction: usize,
    pub inner_distance: i32,
}

/// Transient interaction state, reset piecewise as the workflow advances.
#[derive(Debug, Clone, Default)]
struct Selection {
    flake: Option<SnowflakeId>,
    arm_edge: Option<ArmEdge>,
    candidate: Option<SnowflakeId>,
    rotation: u8,
    preview: Option<Mesh>,
}

/// Editor over a snowflake arena with one designated root.
#[derive(Debug, Clone)]
pub struct SnowflakeEditor {
    arena: SnowflakeArena,
    root: SnowflakeId,
    selection: Selection,
}

impl SnowflakeEditor {
    /// Creates an editor holding a single bare root at the origin.
    pub fn new() -> Self {
        let mut arena = SnowflakeArena::new();
        let root = arena.insert(GridPoint::ORIGIN);
        Self { arena, root, selection: Selection::default() }
    }

    /// Creates an editor preloaded with the default demo composition: an
    /// 8-arm root with a 4-arm child attached at distance 4, rotation 1.
    pub fn demo() -> Self {
        let mut editor = Self::new();
        let child = editor.arena.insert(GridPoint::new(-3, -2));
        editor.arena.flake_mut(editor.root).extend_arm(0, 8);
        editor.arena.flake_mut(child).extend_arm(0, 4);
        editor
            .arena
            .attach(editor.root, 0, Attachment { distance: 4, rotation: 1, child });
        editor.arena.recalculate_shape(editor.root);
        editor
    }

    #[inline]
    pub fn arena(&self) -> &SnowflakeArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> SnowflakeId {
        self.root
    }

    #[inline]
    pub fn selected(&self) -> Option<SnowflakeId> {
        self.selection.flake
    }

    #[inline]
    pub fn selected_edge(&self) -> Option<ArmEdge> {
        self.selection.arm_edge
    }

    #[inline]
    pub fn candidate(&self) -> Option<SnowflakeId> {
        self.selection.candidate
    }

    #[inline]
    pub fn candidate_rotation(&self) -> u8 {
        self.selection.rotation
    }

    /// Returns the staged child overlay, if the slot, candidate and
    /// rotation currently determine one.
    #[inline]
    pub fn preview_mesh(&self) -> Option<&Mesh> {
        self.selection.preview.as_ref()
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Selects a snowflake, resetting the attachment workflow.
    pub fn select(&mut self, id: SnowflakeId) {
        self.selection = Selection { flake: Some(id), ..Selection::default() };
    }

    /// Clears the whole selection state.
    pub fn deselect(&mut self) {
        self.selection = Selection::default();
    }

    /// Selects the snowflake whose origin sits at the given position.
    /// Returns whether one was found.
    pub fn try_select_at(&mut self, position: GridPoint) -> bool {
        match self.arena.find_at(position) {
            Some(id) => {
                self.select(id);
                true
            }
            None => false,
        }
    }

    /// Creates a fresh snowflake at the given position and selects it.
    pub fn place_snowflake(&mut self, position: GridPoint) -> SnowflakeId {
        let id = self.arena.insert(position);
        self.select(id);
        id
    }

    /// Destroys a snowflake and re-derives everything that depended on it.
    /// The root is not removable.
    pub fn remove_snowflake(&mut self, id: SnowflakeId) -> Result<bool, SnowflakeError> {
        if id == self.root {
            return Ok(false);
        }
        self.arena.remove(id)?;
        self.deselect();
        Ok(true)
    }

    /// Moves the selected snowflake by a grid delta. The root stays put.
    pub fn move_selected(&mut self, delta: GridPoint) -> bool {
        match self.selection.flake {
            Some(id) if id != self.root => {
                self.arena.flake_mut(id).mesh_mut().translate(delta);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // CLICK HANDLING
    // =========================================================================

    /// Routes a primary click against the selected snowflake.
    ///
    /// A node on one of the selected snowflake's axes beyond the current
    /// arm extends that arm. While an arm edge is selected, a node on
    /// another snowflake's origin stages it as the child candidate, unless
    /// the attachment would close a dependency cycle. An arm edge becomes
    /// the attachment slot. Any other click drops the selection.
    pub fn handle_click(&mut self, element: &PickedElement) -> Result<bool, SnowflakeError> {
        let Some(selected) = self.selection.flake else {
            return Ok(false);
        };
        match *element {
            PickedElement::Node(p) => {
                if let Some((direction, distance)) = self.arena.flake(selected).arm_hit(p) {
                    if distance > self.arena.flake(selected).arms()[direction] {
                        self.arena.flake_mut(selected).extend_arm(direction, distance);
                        self.arena.recalculate_ancestors(selected)?;
                        return Ok(true);
                    }
                }
                if let (Some(_), Some(other)) = (self.selection.arm_edge, self.arena.find_at(p)) {
                    if other != selected {
                        if self.arena.would_cycle(selected, other) {
                            return Ok(false);
                        }
                        self.selection.candidate = Some(other);
                        self.selection.rotation = 0;
                        self.regenerate_preview();
                        return Ok(true);
                    }
                }
                self.deselect();
                Ok(false)
            }
            PickedElement::Edge(a, b) => {
                let Some(arm_edge) = self.resolve_arm_edge(selected, a, b) else {
                    self.deselect();
                    return Ok(false);
                };
                self.selection.arm_edge = Some(arm_edge);
                self.selection.candidate = None;
                self.selection.preview = None;
                Ok(true)
            }
            PickedElement::Face(..) => {
                self.deselect();
                Ok(false)
            }
        }
    }

    /// Routes a removal click against the selected snowflake.
    ///
    /// The tip node of an arm shortens that arm by one, dropping any
    /// attachment anchored at the removed segment. An arm edge drops the
    /// attachments anchored at its inner endpoint, leaving the arm itself
    /// intact.
    pub fn handle_remove_click(&mut self, element: &PickedElement) -> Result<bool, SnowflakeError> {
        let Some(selected) = self.selection.flake else {
            return Ok(false);
        };
        match *element {
            PickedElement::Node(p) => {
                let Some((direction, distance)) = self.arena.flake(selected).arm_hit(p) else {
                    return Ok(false);
                };
                if distance == 0 || distance != self.arena.flake(selected).arms()[direction] {
                    return Ok(false);
                }
                self.arena.flake_mut(selected).set_arm(direction, distance - 1);
                self.clear_attachment_workflow();
                self.arena.detach_at(selected, direction, distance - 1);
                self.arena.recalculate_shape(selected);
                self.arena.recalculate_ancestors(selected)?;
                Ok(true)
            }
            PickedElement::Edge(a, b) => {
                let Some(arm_edge) = self.resolve_arm_edge(selected, a, b) else {
                    return Ok(false);
                };
                self.clear_attachment_workflow();
                if !self.arena.detach_at(selected, arm_edge.direction, arm_edge.inner_distance) {
                    return Ok(false);
                }
                self.arena.recalculate_shape(selected);
                self.arena.recalculate_ancestors(selected)?;
                Ok(true)
            }
            PickedElement::Face(..) => Ok(false),
        }
    }

    /// Rotates the staged child candidate by one 60 degree step.
    pub fn rotate_candidate(&mut self, counterclockwise: bool) {
        if self.selection.candidate.is_none() {
            return;
        }
        let step = if counterclockwise { 1 } else { 5 };
        self.selection.rotation = (self.selection.rotation + step) % 6;
        self.regenerate_preview();
    }

    /// Commits the staged attachment: merges the preview overlay into the
    /// selected snowflake and records the attachment. Returns whether an
    /// attachment was made.
    pub fn confirm(&mut self) -> Result<bool, SnowflakeError> {
        let Some(selected) = self.selection.flake else {
            return Ok(false);
        };
        let (Some(arm_edge), Some(candidate)) =
            (self.selection.arm_edge, self.selection.candidate)
        else {
            return Ok(false);
        };
        let attachment = Attachment {
            distance: arm_edge.inner_distance,
            rotation: self.selection.rotation,
            child: candidate,
        };
        if !self.arena.attach(selected, arm_edge.direction, attachment) {
            return Ok(false);
        }
        if let Some(preview) = self.selection.preview.take() {
            let flake = self.arena.flake_mut(selected);
            flake.mesh_mut().merge_with(&preview);
            flake.refresh_arms();
        }
        self.clear_attachment_workflow();
        self.arena.recalculate_ancestors(selected)?;
        Ok(true)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn clear_attachment_workflow(&mut self) {
        self.selection.arm_edge = None;
        self.selection.candidate = None;
        self.selection.rotation = 0;
        self.selection.preview = None;
    }

    /// Validates a picked edge as an arm segment of the given snowflake.
    ///
    /// Both endpoints must hit an axis, with distances one step apart, at
    /// compatible directions (they may only differ where one endpoint is
    /// the origin), and the outer endpoint must lie within the arm.
    fn resolve_arm_edge(&self, id: SnowflakeId, a: GridPoint, b: GridPoint) -> Option<ArmEdge> {
        let flake = self.arena.flake(id);
        let (d1, k1) = flake.arm_hit(a)?;
        let (d2, k2) = flake.arm_hit(b)?;
        if d1 != d2 && k1 != 0 && k2 != 0 {
            return None;
        }
        if (k1 - k2).abs() != 1 {
            return None;
        }
        let direction = d1.max(d2);
        if k1.max(k2) > flake.arms()[direction] {
            return None;
        }
        Some(ArmEdge { direction, inner_distance: k1.min(k2) })
    }

    fn regenerate_preview(&mut self) {
        let (Some(selected), Some(arm_edge), Some(candidate)) =
            (self.selection.flake, self.selection.arm_edge, self.selection.candidate)
        else {
            self.selection.preview = None;
            return;
        };
        let anchor = self.arena.flake(selected).position()
            + direction_vector(arm_edge.direction) * arm_edge.inner_distance;
        self.selection.preview = Some(shifted_mesh(
            self.arena.flake(candidate).mesh(),
            anchor,
            self.selection.rotation,
            arm_edge.direction,
        ));
    }
}

impl Default for SnowflakeEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> GridPoint {
        GridPoint::new(x, y)
    }

    #[test]
    fn test_node_click_extends_arm() {
        let mut editor = SnowflakeEditor::new();
        editor.select(editor.root());
        assert!(editor.handle_click(&PickedElement::Node(p(0, 5))).unwrap());
        assert_eq!(editor.arena().flake(editor.root()).arms()[1], 5);
        // Clicking within the existing arm neither extends nor deselects
        // into nothing useful, but the selection is dropped.
        assert!(!editor.handle_click(&PickedElement::Node(p(0, 3))).unwrap());
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_off_axis_click_deselects() {
        let mut editor = SnowflakeEditor::new();
        editor.select(editor.root());
        assert!(!editor.handle_click(&PickedElement::Node(p(2, 1))).unwrap());
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_edge_click_marks_attachment_slot() {
        let mut editor = SnowflakeEditor::new();
        editor.select(editor.root());
        editor.handle_click(&PickedElement::Node(p(4, 0))).unwrap();
        assert!(editor.handle_click(&PickedElement::Edge(p(2, 0), p(3, 0))).unwrap());
        assert_eq!(
            editor.selected_edge(),
            Some(ArmEdge { direction: 0, inner_distance: 2 })
        );
        // The origin edge resolves against the nonzero endpoint.
        assert!(editor.handle_click(&PickedElement::Edge(p(0, 0), p(1, 0))).unwrap());
        assert_eq!(
            editor.selected_edge(),
            Some(ArmEdge { direction: 0, inner_distance: 0 })
        );
    }

    #[test]
    fn test_edge_click_rejects_invalid_segments() {
        let mut editor = SnowflakeEditor::new();
        editor.select(editor.root());
        editor.handle_click(&PickedElement::Node(p(3, 0))).unwrap();
        editor.select(editor.root());
        editor.handle_click(&PickedElement::Node(p(0, 3))).unwrap();

        // Mixed directions away from the origin.
        editor.select(editor.root());
        assert!(!editor.handle_click(&PickedElement::Edge(p(1, 0), p(0, 1))).unwrap());
        // Not adjacent along the arm.
        editor.select(editor.root());
        assert!(!editor.handle_click(&PickedElement::Edge(p(1, 0), p(3, 0))).unwrap());
        // Beyond the arm tip.
        editor.select(editor.root());
        assert!(!editor.handle_click(&PickedElement::Edge(p(3, 0), p(4, 0))).unwrap());
    }

    #[test]
    fn test_attachment_workflow_builds_demo_composition() {
        let mut editor = SnowflakeEditor::new();
        editor.select(editor.root());
        editor.handle_click(&PickedElement::Node(p(8, 0))).unwrap();

        let child = editor.place_snowflake(p(-3, -2));
        editor.handle_click(&PickedElement::Node(p(1, -2))).unwrap();
        assert_eq!(editor.arena().flake(child).arms()[0], 4);

        editor.select(editor.root());
        assert!(editor.handle_click(&PickedElement::Edge(p(4, 0), p(5, 0))).unwrap());
        assert!(editor.handle_click(&PickedElement::Node(p(-3, -2))).unwrap());
        assert_eq!(editor.candidate(), Some(child));
        assert!(editor.preview_mesh().is_some());

        editor.rotate_candidate(true);
        assert_eq!(editor.candidate_rotation(), 1);
        assert!(editor.confirm().unwrap());

        let root = editor.arena().flake(editor.root());
        assert_eq!(root.children(0).len(), 1);
        assert_eq!(
            root.children(0)[0],
            Attachment { distance: 4, rotation: 1, child }
        );
        assert_eq!(root.mesh().node_count(), 17);
        assert!(editor.selected_edge().is_none());
        assert!(editor.candidate().is_none());
        assert!(editor.preview_mesh().is_none());
    }

    #[test]
    fn test_demo_matches_workflow_result() {
        let editor = SnowflakeEditor::demo();
        let root = editor.arena().flake(editor.root());
        assert_eq!(root.arms()[0], 8);
        assert_eq!(root.mesh().node_count(), 17);
        assert_eq!(root.children(0).len(), 1);
    }

    #[test]
    fn test_candidate_requires_selected_edge() {
        let mut editor = SnowflakeEditor::demo();
        editor.place_snowflake(p(20, 20));
        editor.select(editor.root());
        // Clicking another origin with no attachment slot selected just
        // drops the selection.
        assert!(!editor.handle_click(&PickedElement::Node(p(20, 20))).unwrap());
        assert!(editor.candidate().is_none());
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_cycle_candidate_rejected() {
        let mut editor = SnowflakeEditor::demo();
        let child = editor.arena().flake(editor.root()).children(0)[0].child;
        editor.select(child);
        // Child arm runs from (-3,-2) toward (1,-2); pick its first edge.
        assert!(editor
            .handle_click(&PickedElement::Edge(p(-3, -2), p(-2, -2)))
            .unwrap());
        // The root depends on the child, so it may not become its child.
        assert!(!editor.handle_click(&PickedElement::Node(p(0, 0))).unwrap());
        assert!(editor.candidate().is_none());
        // The rejection leaves the selection alone.
        assert_eq!(editor.selected(), Some(child));
        assert!(editor.selected_edge().is_some());
    }

    #[test]
    fn test_rotate_without_candidate_is_noop() {
        let mut editor = SnowflakeEditor::new();
        editor.select(editor.root());
        editor.rotate_candidate(true);
        assert_eq!(editor.candidate_rotation(), 0);
    }

    #[test]
    fn test_remove_click_shrinks_arm_tip_only() {
        let mut editor = SnowflakeEditor::new();
        editor.select(editor.root());
        editor.handle_click(&PickedElement::Node(p(3, 0))).unwrap();

        // Inner nodes and the origin are not removable.
        assert!(!editor.handle_remove_click(&PickedElement::Node(p(2, 0))).unwrap());
        assert!(!editor.handle_remove_click(&PickedElement::Node(p(0, 0))).unwrap());

        assert!(editor.handle_remove_click(&PickedElement::Node(p(3, 0))).unwrap());
        let root = editor.arena().flake(editor.root());
        assert_eq!(root.arms()[0], 2);
        assert_eq!(root.mesh().node_count(), 3);
    }

    #[test]
    fn test_remove_tip_detaches_anchored_child() {
        let mut editor = SnowflakeEditor::demo();
        let child = editor.arena().flake(editor.root()).children(0)[0].child;
        editor.select(editor.root());
        // Removing the tip at 8 leaves the attachment at 4 alone.
        assert!(editor.handle_remove_click(&PickedElement::Node(p(8, 0))).unwrap());
        assert_eq!(editor.arena().flake(editor.root()).children(0).len(), 1);

        // Shrink down to the segment carrying the attachment.
        for dist in (5..=7).rev() {
            assert!(editor
                .handle_remove_click(&PickedElement::Node(p(dist, 0)))
                .unwrap());
        }
        assert!(editor.arena().flake(editor.root()).children(0).is_empty());
        assert!(!editor.arena().flake(child).parents().contains(&editor.root()));
        assert_eq!(editor.arena().flake(editor.root()).mesh().node_count(), 5);
    }

    #[test]
    fn test_remove_click_on_edge_detaches_only() {
        let mut editor = SnowflakeEditor::demo();
        editor.select(editor.root());
        // The attachment sits on segment 4..5.
        assert!(editor
            .handle_remove_click(&PickedElement::Edge(p(4, 0), p(5, 0)))
            .unwrap());
        let root = editor.arena().flake(editor.root());
        assert!(root.children(0).is_empty());
        // The arm itself survives.
        assert_eq!(root.arms()[0], 8);
        assert_eq!(root.mesh().node_count(), 9);
        // A bare arm segment has nothing left to detach.
        assert!(!editor
            .handle_remove_click(&PickedElement::Edge(p(4, 0), p(5, 0)))
            .unwrap());
    }

    #[test]
    fn test_root_is_immovable_and_unremovable() {
        let mut editor = SnowflakeEditor::new();
        let root = editor.root();
        editor.select(root);
        assert!(!editor.move_selected(p(1, 1)));
        assert!(!editor.remove_snowflake(root).unwrap());
        assert!(editor.arena().get(root).is_some());
    }

    #[test]
    fn test_move_and_select_at_position() {
        let mut editor = SnowflakeEditor::new();
        let id = editor.place_snowflake(p(5, 5));
        assert!(editor.move_selected(p(1, -2)));
        assert_eq!(editor.arena().flake(id).position(), p(6, 3));
        editor.deselect();
        assert!(editor.try_select_at(p(6, 3)));
        assert_eq!(editor.selected(), Some(id));
        assert!(!editor.try_select_at(p(5, 5)));
    }

    #[test]
    fn test_remove_snowflake_updates_parents() {
        let mut editor = SnowflakeEditor::demo();
        let child = editor.arena().flake(editor.root()).children(0)[0].child;
        assert!(editor.remove_snowflake(child).unwrap());
        assert!(editor.arena().get(child).is_none());
        let root = editor.arena().flake(editor.root());
        assert!(root.children(0).is_empty());
        assert_eq!(root.mesh().node_count(), 9);
    }
}
