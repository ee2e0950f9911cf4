//! The control tree arena.
//!
//! All controls on a host surface live in one [`ControlTree`]: a slotmap
//! arena that owns every control and records the tree structure alongside it.
//! A node stores the boxed control, an optional (non-owning) parent handle,
//! an ordered child list, and the container facet — an optional layout engine
//! plus its invalidation flag.
//!
//! # Coordinate bookkeeping
//!
//! Each control's `origin` (the accumulated absolute offset of its parent's
//! coordinate space) is pushed down the subtree eagerly whenever bounds,
//! parent, or padding change. Hit testing and input dispatch therefore never
//! walk parent chains to translate coordinates.
//!
//! # Hit-test order
//!
//! Children are scanned **in iteration order** and the first visible match
//! wins, while painting also draws children in iteration order (so later
//! children draw over earlier ones). Input priority and visual occlusion are
//! thus inverted by convention; callers order children accordingly. This is
//! long-standing behavior that downstream controls depend on — tests pin it.
//!
//! # Layout invalidation
//!
//! A container never re-runs its layout engine synchronously on mutation.
//! Structural changes (child add/remove, bounds change, desired-dimension
//! change) set a dirty flag; the engine runs once at the next hit test or
//! paint of that container, and the flag clears. Mutations batched within one
//! host tick cost a single layout pass.

use std::collections::HashSet;

use slotmap::{SlotMap, new_key_type};
use tracing::trace;

use mullion_core::logging::targets;
use mullion_core::{Insets, Point, Rect};

use super::base::ControlBase;
use super::traits::{Control, PaintContext, PaintSurface};
use crate::layout::{LayoutContext, LayoutEngine};

new_key_type! {
    /// A stable handle to a control in a [`ControlTree`].
    ///
    /// Handles remain valid as the tree changes shape and become invalid when
    /// the control is removed; operations on stale handles degrade to no-ops
    /// or `None`.
    pub struct ControlId;
}

/// Errors from structural tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The control handle is invalid or the control has been removed.
    #[error("invalid or removed control handle")]
    InvalidControl,

    /// The control is already attached to a parent.
    #[error("control is already attached to a parent")]
    AlreadyAttached,

    /// The child is not a child of the given parent.
    #[error("control is not a child of the given parent")]
    NotAChild,

    /// Attaching would make a control its own ancestor.
    #[error("attaching would create a cycle in the control tree")]
    CircularParentage,
}

/// One arena slot: the control plus its tree structure and container facet.
struct Node {
    control: Box<dyn Control>,
    parent: Option<ControlId>,
    children: Vec<ControlId>,
    layout: Option<Box<dyn LayoutEngine>>,
    layout_dirty: bool,
}

/// Arena owning every control on one host surface.
#[derive(Default)]
pub struct ControlTree {
    nodes: SlotMap<ControlId, Node>,
}

impl ControlTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert a control, detached. Attach it with [`add_child`](Self::add_child).
    pub fn insert(&mut self, control: Box<dyn Control>) -> ControlId {
        let id = self.nodes.insert(Node {
            control,
            parent: None,
            children: Vec::new(),
            layout: None,
            layout_dirty: false,
        });
        trace!(target: targets::TREE, control = ?id, "control inserted");
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Sets the child's parent pointer, recomputes origins down the child's
    /// subtree, and marks the parent's layout dirty.
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(TreeError::InvalidControl);
        }
        if self.nodes[child].parent.is_some() {
            return Err(TreeError::AlreadyAttached);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::CircularParentage);
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.refresh_origin(child);
        self.mark_layout_dirty(parent);
        Ok(())
    }

    /// Detach `child` from `parent`, keeping the child (and its subtree) in
    /// the arena.
    pub fn remove_child(&mut self, parent: ControlId, child: ControlId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(TreeError::InvalidControl);
        }
        if self.nodes[child].parent != Some(parent) {
            return Err(TreeError::NotAChild);
        }

        self.nodes[parent].children.retain(|&c| c != child);
        self.nodes[child].parent = None;
        self.refresh_origin(child);
        self.mark_layout_dirty(parent);
        Ok(())
    }

    /// Remove a control and its entire subtree from the arena.
    ///
    /// Callers that need teardown notifications deliver them *before* calling
    /// this; removal itself is silent.
    pub fn remove_subtree(&mut self, id: ControlId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if let Some(parent) = self.nodes[id].parent {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|&c| c != id);
                node.layout_dirty = true;
            }
        }
        for node_id in self.subtree_ids(id) {
            self.nodes.remove(node_id);
        }
        trace!(target: targets::TREE, control = ?id, "subtree removed");
    }

    /// Remove every control.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Check if a handle refers to a live control.
    pub fn contains(&self, id: ControlId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of controls in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The parent of a control, if attached.
    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// The ordered children of a control.
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, parent: ControlId, name: &str) -> Option<ControlId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.base(c).is_some_and(|b| b.name() == name))
    }

    /// All handles in the subtree rooted at `id`, in pre-order.
    pub fn subtree_ids(&self, id: ControlId) -> Vec<ControlId> {
        let mut ids = Vec::new();
        self.collect_subtree(id, &mut ids);
        ids
    }

    fn collect_subtree(&self, id: ControlId, ids: &mut Vec<ControlId>) {
        if !self.nodes.contains_key(id) {
            return;
        }
        ids.push(id);
        let children = self.nodes[id].children.clone();
        for child in children {
            self.collect_subtree(child, ids);
        }
    }

    fn is_ancestor(&self, candidate: ControlId, of: ControlId) -> bool {
        let mut current = self.parent(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    // =========================================================================
    // Control access
    // =========================================================================

    /// Get a control by handle.
    pub fn control(&self, id: ControlId) -> Option<&dyn Control> {
        self.nodes.get(id).map(|n| n.control.as_ref())
    }

    /// Get a control mutably by handle.
    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut (dyn Control + 'static)> {
        self.nodes.get_mut(id).map(|n| n.control.as_mut())
    }

    /// Get a control's base by handle.
    pub fn base(&self, id: ControlId) -> Option<&ControlBase> {
        self.nodes.get(id).map(|n| n.control.control_base())
    }

    /// Get a control's base mutably by handle.
    ///
    /// Bounds, padding, and desired-size changes on attached controls should
    /// go through the tree-level setters instead so origins and layout flags
    /// stay consistent.
    pub fn base_mut(&mut self, id: ControlId) -> Option<&mut ControlBase> {
        self.nodes.get_mut(id).map(|n| n.control.control_base_mut())
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Set a control's bounds, recompute descendant origins, and mark the
    /// control and its parent dirty for layout.
    pub fn set_bounds(&mut self, id: ControlId, rect: Rect) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.control.control_base_mut().set_bounds(rect);
        self.push_origins(id);
        self.mark_layout_dirty(id);
        if let Some(parent) = self.parent(id) {
            self.mark_layout_dirty(parent);
        }
    }

    /// Set a control's padding and recompute origins down its subtree.
    pub fn set_padding(&mut self, id: ControlId, padding: Insets) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.control.control_base_mut().set_padding(padding);
        self.push_origins(id);
        self.mark_layout_dirty(id);
    }

    /// Set a control's desired-size hints and invalidate the parent's layout.
    pub fn set_desired_size(&mut self, id: ControlId, width: Option<f32>, height: Option<f32>) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.control.control_base_mut().set_desired_size(width, height);
        if let Some(parent) = self.parent(id) {
            self.mark_layout_dirty(parent);
        }
    }

    /// Translate a screen-space point into a control's local space.
    pub fn screen_to_local(&self, id: ControlId, point: Point) -> Point {
        match self.base(id) {
            Some(base) => point - base.absolute_position(),
            None => point,
        }
    }

    /// Recompute a control's own origin from its parent, then push down.
    fn refresh_origin(&mut self, id: ControlId) {
        let origin = self
            .parent(id)
            .and_then(|p| self.base(p))
            .map(|b| b.absolute_position())
            .unwrap_or(Point::ZERO);
        if let Some(node) = self.nodes.get_mut(id) {
            node.control.control_base_mut().set_origin(origin);
        }
        self.push_origins(id);
    }

    /// Push origins down the subtree: every child's origin becomes this
    /// control's absolute position.
    fn push_origins(&mut self, id: ControlId) {
        let Some(base) = self.base(id) else {
            return;
        };
        let origin = base.absolute_position();
        let children = self.nodes[id].children.clone();
        for child in children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.control.control_base_mut().set_origin(origin);
            }
            self.push_origins(child);
        }
    }

    // =========================================================================
    // Input state flags
    // =========================================================================

    pub(crate) fn set_hovered(&mut self, id: ControlId, hovered: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.control.control_base_mut().set_hovered(hovered);
        }
    }

    pub(crate) fn set_focused(&mut self, id: ControlId, focused: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.control.control_base_mut().set_focused(focused);
        }
    }

    // =========================================================================
    // Layout invalidation
    // =========================================================================

    /// Attach (or clear) a container's layout engine. Marks the layout dirty.
    pub fn set_layout_engine(&mut self, id: ControlId, engine: Option<Box<dyn LayoutEngine>>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.layout = engine;
            node.layout_dirty = true;
        }
    }

    /// Mark a container's layout as needing recalculation.
    pub fn mark_layout_dirty(&mut self, id: ControlId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.layout_dirty = true;
        }
    }

    /// Check if a container's layout is pending recalculation.
    pub fn is_layout_dirty(&self, id: ControlId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.layout_dirty)
    }

    /// Run the layout engine now if the dirty flag is set.
    ///
    /// Invoked from hit testing and painting; the flag clears regardless of
    /// whether an engine is attached, so a bare container does not stay
    /// permanently dirty.
    pub(crate) fn run_layout_if_dirty(&mut self, id: ControlId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.layout_dirty {
            return;
        }
        node.layout_dirty = false;
        let Some(mut engine) = node.layout.take() else {
            return;
        };

        let base = node.control.control_base();
        let area = base.rect().inset(base.padding());
        let children = node.children.clone();
        trace!(target: targets::LAYOUT, control = ?id, "running layout engine");

        let changed = {
            let mut ctx = LayoutContext::new(self, children);
            engine.arrange(area, &mut ctx);
            ctx.into_changed()
        };

        // A child whose bounds moved has descendants to re-origin and its own
        // layout to redo.
        for child in changed {
            self.push_origins(child);
            self.mark_layout_dirty(child);
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.layout = Some(engine);
        }
    }

    // =========================================================================
    // Hit testing and dispatch target resolution
    // =========================================================================

    /// Find the control at a point, starting from `id` with the point in
    /// `id`'s local space.
    ///
    /// Children are scanned in iteration order; the first visible child whose
    /// bounds contain the point wins and is recursed into. With no match the
    /// control itself is the result — a container is always hit-testable as a
    /// fallback.
    pub fn hit_test(&mut self, id: ControlId, local: Point) -> ControlId {
        self.run_layout_if_dirty(id);
        let children = self.children(id).to_vec();
        for child in children {
            let Some(base) = self.base(child) else {
                continue;
            };
            if base.is_visible() && base.bounds().contains(local) {
                let child_local = base.map_from_parent(local);
                return self.hit_test(child, child_local);
            }
        }
        id
    }

    /// Resolve the target for a press/release/wheel event.
    ///
    /// Identical scan to [`hit_test`](Self::hit_test), but the match must
    /// also be enabled: a visible-but-disabled match makes the event
    /// unhandled, with no re-dispatch to siblings.
    pub fn interactive_target(&mut self, id: ControlId, local: Point) -> Option<ControlId> {
        if !self.base(id)?.is_enabled() {
            return None;
        }
        self.run_layout_if_dirty(id);
        let children = self.children(id).to_vec();
        for child in children {
            let Some(base) = self.base(child) else {
                continue;
            };
            if base.is_visible() && base.bounds().contains(local) {
                let child_local = base.map_from_parent(local);
                return self.interactive_target(child, child_local);
            }
        }
        Some(id)
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint a subtree: the control first, then its children in order (so
    /// later children draw over earlier ones).
    ///
    /// Runs any pending layout on each visited container.
    pub fn paint(&mut self, id: ControlId, surface: &mut dyn PaintSurface) {
        let Some(base) = self.base(id) else {
            return;
        };
        if !base.is_visible() {
            return;
        }
        self.run_layout_if_dirty(id);

        {
            let node = &self.nodes[id];
            let base = node.control.control_base();
            let mut ctx = PaintContext::new(surface, base.absolute_position(), base.rect());
            node.control.paint(&mut ctx);
        }

        let children = self.children(id).to_vec();
        for child in children {
            self.paint(child, surface);
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate a subtree, accumulating human-readable problem reports.
    ///
    /// Checks duplicate sibling names, degenerate bounds, and tab indices on
    /// controls that refuse focus, then gives each control its own say. Never
    /// stops at the first problem.
    pub fn validate_subtree(&self, id: ControlId, problems: &mut Vec<String>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let base = node.control.control_base();

        if base.bounds().size.width < 0.0 || base.bounds().size.height < 0.0 {
            problems.push(format!(
                "control '{}' has negative bounds {:?}",
                base.name(),
                base.bounds()
            ));
        }
        if base.tab_index() >= 0 && !node.control.can_accept_focus() {
            problems.push(format!(
                "control '{}' is in the tab order but refuses focus",
                base.name()
            ));
        }

        let mut seen = HashSet::new();
        for &child in &node.children {
            if let Some(child_base) = self.base(child) {
                if !child_base.name().is_empty() && !seen.insert(child_base.name().to_string()) {
                    problems.push(format!(
                        "duplicate child name '{}' under '{}'",
                        child_base.name(),
                        base.name()
                    ));
                }
            }
        }

        node.control.validate(problems);

        let children = node.children.clone();
        for child in children {
            self.validate_subtree(child, problems);
        }
    }
}

impl std::fmt::Debug for ControlTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlTree")
            .field("controls", &self.nodes.len())
            .finish()
    }
}
