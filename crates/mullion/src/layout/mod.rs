//! Layout engines for container controls.
//!
//! A container does not position its children itself; it delegates to a
//! [`LayoutEngine`] attached via
//! [`ControlTree::set_layout_engine`](crate::control::ControlTree::set_layout_engine).
//! The engine runs lazily: structural changes only mark the container dirty,
//! and the tree invokes [`LayoutEngine::arrange`] once at the next hit test
//! or paint.
//!
//! Engines operate through a [`LayoutContext`] that exposes exactly the state
//! the contract allows: child bounds, desired-size hints, visibility, and the
//! opaque per-child hint. The invalidation flag itself is the tree's to
//! manage; engines never see it.

mod box_layout;

pub use box_layout::{BoxLayout, Orientation};

use std::any::Any;

use mullion_core::Rect;

use crate::control::{ControlId, ControlTree};

/// Positions the children of one container within its content area.
pub trait LayoutEngine: Send + Sync {
    /// Arrange the container's children.
    ///
    /// `area` is the container's content rectangle in container-local
    /// coordinates (bounds shrunk by padding). Write child positions with
    /// [`LayoutContext::set_child_bounds`].
    fn arrange(&mut self, area: Rect, ctx: &mut LayoutContext<'_>);
}

/// The engine's window onto a container's children.
///
/// Children are addressed by index in the container's child order.
pub struct LayoutContext<'a> {
    tree: &'a mut ControlTree,
    children: Vec<ControlId>,
    changed: Vec<ControlId>,
}

impl<'a> LayoutContext<'a> {
    pub(crate) fn new(tree: &'a mut ControlTree, children: Vec<ControlId>) -> Self {
        Self {
            tree,
            children,
            changed: Vec::new(),
        }
    }

    pub(crate) fn into_changed(self) -> Vec<ControlId> {
        self.changed
    }

    /// Number of children being arranged.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// A child's current bounds in container-local coordinates.
    pub fn child_bounds(&self, index: usize) -> Rect {
        self.children
            .get(index)
            .and_then(|&id| self.tree.base(id))
            .map(|b| b.bounds())
            .unwrap_or(Rect::ZERO)
    }

    /// Set a child's bounds.
    ///
    /// Bypasses the tree-level setter: the tree recomputes descendant origins
    /// and cascades invalidation for every child the engine actually moved,
    /// after the arrange pass finishes.
    pub fn set_child_bounds(&mut self, index: usize, rect: Rect) {
        let Some(&id) = self.children.get(index) else {
            return;
        };
        let Some(base) = self.tree.base_mut(id) else {
            return;
        };
        if base.bounds() != rect {
            base.set_bounds(rect);
            self.changed.push(id);
        }
    }

    /// A child's desired-size hints `(width, height)`.
    pub fn desired_size(&self, index: usize) -> (Option<f32>, Option<f32>) {
        self.children
            .get(index)
            .and_then(|&id| self.tree.base(id))
            .map(|b| (b.desired_width(), b.desired_height()))
            .unwrap_or((None, None))
    }

    /// Whether a child is visible.
    pub fn is_child_visible(&self, index: usize) -> bool {
        self.children
            .get(index)
            .and_then(|&id| self.tree.base(id))
            .is_some_and(|b| b.is_visible())
    }

    /// A child's opaque layout hint, if one is attached.
    pub fn layout_hint(&self, index: usize) -> Option<&(dyn Any + Send + Sync)> {
        self.children
            .get(index)
            .and_then(|&id| self.tree.base(id))
            .and_then(|b| b.layout_hint())
    }
}
