//! Core control trait definitions.
//!
//! This module defines the [`Control`] trait, the interface for every node in
//! the control tree, together with the painting boundary types
//! ([`PaintSurface`], [`PaintContext`]).
//!
//! There is no class hierarchy of leaf/compound/container controls. A control
//! is its base state plus optional *capabilities*, expressed as defaulted
//! trait methods: keyboard focus acquisition, the drag-source slot, and the
//! drop-target policy. A container is simply a control whose tree node has
//! children (and, usually, a layout engine).

use mullion_core::{Color, Point, Rect, Size};

use super::arbiter::EventContext;
use super::base::ControlBase;
use super::drag::Draggable;
use super::events::ControlEvent;

/// The rendering primitives a host must supply for control painting.
///
/// All coordinates are absolute (screen space); [`PaintContext`] performs the
/// local-to-absolute translation before calling in here.
pub trait PaintSurface {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
}

/// Context provided during control painting.
///
/// Wraps the host's [`PaintSurface`] and the control's absolute origin so the
/// control can paint in local coordinates, with `(0, 0)` at its own top-left
/// corner.
pub struct PaintContext<'a> {
    surface: &'a mut dyn PaintSurface,
    origin: Point,
    rect: Rect,
}

impl<'a> PaintContext<'a> {
    /// Create a paint context for a control at the given absolute origin.
    pub fn new(surface: &'a mut dyn PaintSurface, origin: Point, rect: Rect) -> Self {
        Self {
            surface,
            origin,
            rect,
        }
    }

    /// The control's local rectangle (origin always at 0,0).
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The control's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.rect.size
    }

    /// The control's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    /// The control's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.rect.height()
    }

    /// Fill a rectangle given in control-local coordinates.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.surface.fill_rect(rect.translated(self.origin), color);
    }

    /// Stroke a rectangle outline given in control-local coordinates.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.surface
            .stroke_rect(rect.translated(self.origin), color, width);
    }
}

/// The core trait for all controls.
///
/// # Required Methods
///
/// Implementors provide access to their [`ControlBase`]; everything else has
/// a default.
///
/// # Events
///
/// [`event`](Self::event) is the single dispatch entry point. Return `true`
/// (or accept the event) to consume it. The [`EventContext`] lets a handler
/// call back into the input arbitration mid-dispatch: capture the pointer,
/// start a drag gesture, or request focus.
///
/// # Capabilities
///
/// The defaults encode "capability absent":
///
/// - [`can_accept_focus`](Self::can_accept_focus) — `true`; containers that
///   should not swallow clicks into focus changes override this to `false`.
/// - [`can_accept_drop`](Self::can_accept_drop) — `false`; drop targets also
///   set [`ControlBase::set_accepts_drops`] so the hover machinery knows the
///   capability exists before asking for a policy decision.
/// - [`set_draggable`](Self::set_draggable) / [`take_draggable`](Self::take_draggable) —
///   no slot; drag sources keep an `Option<Box<dyn Draggable>>` field.
///
/// # Example
///
/// ```ignore
/// struct ColorBox {
///     base: ControlBase,
///     color: Color,
/// }
///
/// impl Control for ColorBox {
///     fn control_base(&self) -> &ControlBase { &self.base }
///     fn control_base_mut(&mut self) -> &mut ControlBase { &mut self.base }
///
///     fn paint(&self, ctx: &mut PaintContext<'_>) {
///         ctx.fill_rect(ctx.rect(), self.color);
///     }
/// }
/// ```
pub trait Control: Send + Sync {
    // =========================================================================
    // Required Methods
    // =========================================================================

    /// Get a reference to the control's base.
    fn control_base(&self) -> &ControlBase;

    /// Get a mutable reference to the control's base.
    fn control_base_mut(&mut self) -> &mut ControlBase;

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the control.
    ///
    /// The context is already translated so that `(0, 0)` is the control's
    /// top-left corner. The default paints nothing; containers rely on the
    /// tree to paint their children afterwards.
    fn paint(&self, _ctx: &mut PaintContext<'_>) {}

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle an event.
    ///
    /// Return `true` if the event was consumed. The default implementation
    /// consumes nothing.
    fn event(&mut self, _event: &mut ControlEvent, _ctx: &mut EventContext<'_>) -> bool {
        false
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Whether a press on this control should move keyboard focus to it.
    fn can_accept_focus(&self) -> bool {
        true
    }

    /// Drop-target policy: inspect a candidate item and accept or reject it.
    ///
    /// Only consulted on controls whose base exposes
    /// [`accepts_drops`](ControlBase::accepts_drops).
    fn can_accept_drop(&self, _item: &dyn Draggable) -> bool {
        false
    }

    /// Drag-source slot: store an item (or clear the slot with `None`).
    ///
    /// Receives the in-flight item on a successful drop, and the pushed-back
    /// item when a gesture that started here is cancelled.
    fn set_draggable(&mut self, _item: Option<Box<dyn Draggable>>) {}

    /// Drag-source slot: surrender the held item, if any.
    fn take_draggable(&mut self) -> Option<Box<dyn Draggable>> {
        None
    }

    /// Whether the drag-source slot currently holds an item.
    fn has_draggable(&self) -> bool {
        false
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Report configuration problems as human-readable strings.
    ///
    /// Called from the manager's `validate`; append to `problems` rather than
    /// failing fast so one pass surfaces everything.
    fn validate(&self, _problems: &mut Vec<String>) {}

    // =========================================================================
    // Convenience delegation
    // =========================================================================

    /// The control's name.
    fn name(&self) -> String {
        self.control_base().name().to_string()
    }

    /// The control's bounds in its parent's coordinate space.
    fn bounds(&self) -> Rect {
        self.control_base().bounds()
    }

    /// Check if the control is visible.
    fn is_visible(&self) -> bool {
        self.control_base().is_visible()
    }

    /// Check if the control is enabled.
    fn is_enabled(&self) -> bool {
        self.control_base().is_enabled()
    }

    /// Check if the control currently has keyboard focus.
    fn has_focus(&self) -> bool {
        self.control_base().has_focus()
    }
}
