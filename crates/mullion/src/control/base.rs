//! Control base implementation.
//!
//! This module provides `ControlBase`, the common implementation details for
//! all controls. It handles geometry, padding, visibility, enabled state, and
//! the state flags maintained by the input machinery.

use std::any::Any;

use mullion_core::{Insets, Point, Rect, Signal};

/// Tab index value meaning "not part of the tab order".
pub const NO_TAB_INDEX: i32 = -1;

/// The base implementation for all controls.
///
/// This struct provides the state every control needs:
/// - Identity (a name, unique within its parent's lookup scope)
/// - Geometry (bounds in the parent's coordinate space, plus the eagerly
///   maintained absolute origin)
/// - Padding and desired-size hints consumed by layout engines
/// - Visibility, enabled, hover, and focus state
/// - Change signals
///
/// Control implementations include this as a field and delegate common
/// operations to it:
///
/// ```ignore
/// struct MyButton {
///     base: ControlBase,
///     label: String,
/// }
///
/// impl Control for MyButton {
///     fn control_base(&self) -> &ControlBase { &self.base }
///     fn control_base_mut(&mut self) -> &mut ControlBase { &mut self.base }
///     // ... paint / event
/// }
/// ```
///
/// # Geometry
///
/// `bounds` positions the control inside its parent. `origin` is the
/// accumulated absolute offset of the parent's coordinate space: for any
/// attached control, `origin == origin(parent) + bounds(parent).origin`. The
/// tree pushes origins down eagerly whenever bounds, parent, or padding
/// change; they are never derived lazily from a parent-chain walk. Prefer
/// [`ControlTree::set_bounds`](super::ControlTree::set_bounds) over the raw
/// setter here for attached controls, so origins and layout flags stay
/// consistent.
pub struct ControlBase {
    /// Name, unique within the parent's lookup scope.
    name: String,

    /// Bounds in the parent's coordinate space.
    bounds: Rect,

    /// Absolute offset of the parent's coordinate space.
    origin: Point,

    /// Edge insets applied by layout engines, clamped per side.
    padding: Insets,

    /// Preferred width for layout, if any.
    desired_width: Option<f32>,

    /// Preferred height for layout, if any.
    desired_height: Option<f32>,

    /// Opaque hint consumed by the parent container's layout engine.
    layout_hint: Option<Box<dyn Any + Send + Sync>>,

    /// Whether the control is visible.
    visible: bool,

    /// Whether the control is enabled (can receive input).
    enabled: bool,

    /// Whether the pointer is currently over this control.
    hovered: bool,

    /// Whether the control currently has keyboard focus.
    focused: bool,

    /// Whether the control exposes the drop-target capability.
    accepts_drops: bool,

    /// Position in the tab order; [`NO_TAB_INDEX`] opts out.
    tab_index: i32,

    /// Signal emitted when the bounds change.
    pub bounds_changed: Signal<Rect>,

    /// Signal emitted when visibility changes.
    pub visible_changed: Signal<bool>,

    /// Signal emitted when enabled state changes.
    pub enabled_changed: Signal<bool>,
}

impl ControlBase {
    /// Create a new control base with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Rect::ZERO,
            origin: Point::ZERO,
            padding: Insets::ZERO,
            desired_width: None,
            desired_height: None,
            layout_hint: None,
            visible: true,
            enabled: true,
            hovered: false,
            focused: false,
            accepts_drops: false,
            tab_index: NO_TAB_INDEX,
            bounds_changed: Signal::new(),
            visible_changed: Signal::new(),
            enabled_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Get the control's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the control's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the control's bounds in the parent's coordinate space.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Set the control's bounds.
    ///
    /// Emits `bounds_changed` if the bounds actually changed. For controls
    /// attached to a tree, prefer `ControlTree::set_bounds`, which also
    /// recomputes descendant origins and marks layout dirty.
    pub fn set_bounds(&mut self, rect: Rect) {
        if self.bounds != rect {
            self.bounds = rect;
            self.bounds_changed.emit(rect);
        }
    }

    /// Get the accumulated absolute origin of the parent's coordinate space.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Set the absolute origin (maintained by the tree).
    pub(crate) fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// The control's absolute position: `origin + bounds.origin`.
    #[inline]
    pub fn absolute_position(&self) -> Point {
        self.origin + self.bounds.origin
    }

    /// A rectangle representing the control's local coordinate space.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.bounds.size)
    }

    /// Map a point from parent coordinates to control-local coordinates.
    #[inline]
    pub fn map_from_parent(&self, point: Point) -> Point {
        point - self.bounds.origin
    }

    /// Map a point from control-local coordinates to parent coordinates.
    #[inline]
    pub fn map_to_parent(&self, point: Point) -> Point {
        point + self.bounds.origin
    }

    // =========================================================================
    // Padding and layout hints
    // =========================================================================

    /// Get the control's padding.
    #[inline]
    pub fn padding(&self) -> Insets {
        self.padding
    }

    /// Set the control's padding. Each side is clamped by [`Insets::new`].
    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    /// Get the desired width hint, if any.
    #[inline]
    pub fn desired_width(&self) -> Option<f32> {
        self.desired_width
    }

    /// Get the desired height hint, if any.
    #[inline]
    pub fn desired_height(&self) -> Option<f32> {
        self.desired_height
    }

    /// Set the desired size hints.
    pub fn set_desired_size(&mut self, width: Option<f32>, height: Option<f32>) {
        self.desired_width = width;
        self.desired_height = height;
    }

    /// Get the opaque layout hint, if any.
    pub fn layout_hint(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.layout_hint.as_deref()
    }

    /// Attach an opaque hint for the parent container's layout engine.
    pub fn set_layout_hint(&mut self, hint: Option<Box<dyn Any + Send + Sync>>) {
        self.layout_hint = hint;
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the control is visible.
    ///
    /// Note: a control may be visible but still not shown on screen if an
    /// ancestor is hidden.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set whether the control is visible.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.visible_changed.emit(visible);
        }
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Check if the control is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set whether the control is enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.enabled_changed.emit(enabled);
        }
    }

    // =========================================================================
    // Input state flags
    // =========================================================================

    /// Check if the pointer is currently over this control.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state (used by the window's per-tick refresh).
    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Check if the control currently has keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Set the focused state (used by the focus arbitration).
    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Check if the control exposes the drop-target capability.
    #[inline]
    pub fn accepts_drops(&self) -> bool {
        self.accepts_drops
    }

    /// Set whether the control exposes the drop-target capability.
    pub fn set_accepts_drops(&mut self, accepts: bool) {
        self.accepts_drops = accepts;
    }

    /// Get the control's tab-order index.
    #[inline]
    pub fn tab_index(&self) -> i32 {
        self.tab_index
    }

    /// Set the control's tab-order index. [`NO_TAB_INDEX`] opts out of tab
    /// navigation.
    pub fn set_tab_index(&mut self, index: i32) {
        self.tab_index = index.max(NO_TAB_INDEX);
    }
}

impl std::fmt::Debug for ControlBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlBase")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("origin", &self.origin)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("tab_index", &self.tab_index)
            .finish_non_exhaustive()
    }
}
