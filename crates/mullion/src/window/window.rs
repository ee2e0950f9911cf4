//! The window abstraction.
//!
//! A [`Window`] is an independent root of one container tree: it owns the
//! root handle, a modal flag, a hidden flag, the derived content-visibility
//! flag, the control currently under the pointer, and a window-local memory
//! of which control holds this window's share of keyboard focus.
//!
//! Windows are created and owned by a windows manager; they hold no reference
//! back to it. Operations that need the control tree receive it as a
//! parameter.

use slotmap::new_key_type;
use tracing::trace;

use mullion_core::Point;
use mullion_core::logging::targets;

use crate::control::{ControlId, ControlTree};

new_key_type! {
    /// A stable handle to a window owned by a windows manager.
    pub struct WindowId;
}

/// Result of a per-tick hover refresh: the controls that lost and gained the
/// pointer, if any.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HoverChange {
    pub left: Option<ControlId>,
    pub entered: Option<ControlId>,
}

/// One root of a container tree with its own modal/visibility state.
#[derive(Debug)]
pub struct Window {
    /// The root container.
    root: ControlId,

    /// Whether this window is modal.
    modal: bool,

    /// Whether the window is hidden outright.
    hidden: bool,

    /// Whether the root container reported visible content last tick.
    content_visible: bool,

    /// The control currently under the pointer, if any.
    hot: Option<ControlId>,

    /// This window's locally-remembered focus control.
    focus: Option<ControlId>,
}

impl Window {
    /// Wrap a root container in a window.
    pub(crate) fn new(root: ControlId, modal: bool) -> Self {
        Self {
            root,
            modal,
            hidden: false,
            content_visible: true,
            hot: None,
            focus: None,
        }
    }

    /// The root container.
    #[inline]
    pub fn root(&self) -> ControlId {
        self.root
    }

    /// Whether this window is modal.
    #[inline]
    pub fn is_modal(&self) -> bool {
        self.modal
    }

    /// Whether the window is hidden outright.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide or show the window.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Whether the root container reported visible content last tick.
    #[inline]
    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }

    /// The control currently under the pointer, if any.
    #[inline]
    pub fn hot_control(&self) -> Option<ControlId> {
        self.hot
    }

    /// This window's locally-remembered focus control.
    #[inline]
    pub fn focus_control(&self) -> Option<ControlId> {
        self.focus
    }

    /// Whether the window participates in hit testing and painting.
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.hidden && self.content_visible
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Find the control at a screen-space point.
    ///
    /// Reports no match when the window is not visible or the point is
    /// outside the root container's bounds.
    pub fn find_control(&self, tree: &mut ControlTree, point: Point) -> Option<ControlId> {
        if !self.is_visible() {
            return None;
        }
        let bounds = tree.base(self.root)?.bounds();
        if !bounds.contains(point) {
            return None;
        }
        Some(tree.hit_test(self.root, point - bounds.origin))
    }

    /// Resolve the target for a press/release/wheel at a screen-space point.
    ///
    /// Like [`find_control`](Self::find_control) but enabled-gated: a
    /// visible-but-disabled match yields `None`.
    pub(crate) fn interactive_target(
        &self,
        tree: &mut ControlTree,
        point: Point,
    ) -> Option<ControlId> {
        if !self.is_visible() {
            return None;
        }
        let bounds = tree.base(self.root)?.bounds();
        if !bounds.contains(point) {
            return None;
        }
        tree.interactive_target(self.root, point - bounds.origin)
    }

    // =========================================================================
    // Per-tick refresh
    // =========================================================================

    /// Recompute content visibility and the pointer-over control.
    ///
    /// Returns the hover transition so the caller can fire at most one Leave
    /// and at most one Enter. While a drag is active the hover update is
    /// suppressed unless the new candidate exposes the drop-target
    /// capability, so ordinary controls are not asked to hover-highlight
    /// under an in-flight payload.
    pub(crate) fn refresh(
        &mut self,
        tree: &mut ControlTree,
        pointer: Point,
        dragging: bool,
        interactive: bool,
    ) -> HoverChange {
        self.content_visible = tree
            .base(self.root)
            .is_some_and(|base| base.is_visible());

        let candidate = if interactive {
            self.find_control(tree, pointer)
        } else {
            None
        };

        if dragging {
            let is_drop_target = candidate
                .and_then(|id| tree.base(id))
                .is_some_and(|base| base.accepts_drops());
            if !is_drop_target {
                return HoverChange::default();
            }
        }

        if candidate == self.hot {
            return HoverChange::default();
        }

        let left = self.hot.take();
        self.hot = candidate;
        trace!(
            target: targets::WINDOW,
            ?left,
            entered = ?candidate,
            "hover changed"
        );
        HoverChange {
            left,
            entered: candidate,
        }
    }

    // =========================================================================
    // Focus bookkeeping
    // =========================================================================

    /// Absorb a system-wide focus change broadcast.
    ///
    /// The owning window remembers the control; every other window clears its
    /// local memory so at most one window claims the focus holder.
    pub(crate) fn handle_focus_changed(&mut self, owner: bool, control: Option<ControlId>) {
        self.focus = if owner { control } else { None };
    }

    /// Drop hot/focus references into a removed control subtree.
    pub(crate) fn forget_controls(&mut self, removed: &[ControlId]) {
        if self.hot.is_some_and(|hot| removed.contains(&hot)) {
            self.hot = None;
        }
        if self.focus.is_some_and(|focus| removed.contains(&focus)) {
            self.focus = None;
        }
    }
}
