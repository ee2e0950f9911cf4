//! Input arbitration state: focus, pointer capture, and the drag payload.
//!
//! The system-wide singletons (the focused control, the capture target, the
//! active drag payload) live in an explicit [`InputArbiter`] owned by the
//! windows manager. There are no process-wide statics; everything that needs
//! to query or mutate this state receives a borrow, and control event
//! handlers get one through [`EventContext`].
//!
//! # Re-entrancy
//!
//! A handler runs while the manager is mid-dispatch, so it cannot perform a
//! full focus change itself (the old and new targets must be notified, and
//! every window told). Instead [`EventContext::request_focus`] records the
//! request on the arbiter; the manager applies it as soon as the in-flight
//! dispatch unwinds. Capture and drag mutations need no notifications and
//! take effect immediately.

use mullion_core::Point;
use tracing::debug;

use mullion_core::logging::targets;

use super::ControlId;
use super::drag::{DragPayload, Draggable};
use crate::window::WindowId;

/// Focus, capture, and drag state for one windows manager.
#[derive(Debug, Default)]
pub struct InputArbiter {
    /// The focused control and the window that owns it.
    focus: Option<(WindowId, ControlId)>,

    /// The pointer-capture target and its owning window.
    capture: Option<(WindowId, ControlId)>,

    /// The active drag payload, if a gesture is in progress.
    drag: Option<DragPayload>,

    /// Last pointer position in screen coordinates.
    pointer: Point,

    /// Focus change requested from inside an in-flight dispatch.
    focus_request: Option<(WindowId, Option<ControlId>)>,
}

impl InputArbiter {
    /// Create an arbiter with no focus, no capture, and no drag.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The focused control and its owning window, if any.
    #[inline]
    pub fn focus(&self) -> Option<(WindowId, ControlId)> {
        self.focus
    }

    /// Update the focus pair. Notification is the manager's job.
    pub(crate) fn set_focus_pair(&mut self, pair: Option<(WindowId, ControlId)>) {
        self.focus = pair;
    }

    /// Record a focus change to be applied after the current dispatch.
    pub(crate) fn request_focus(&mut self, window: WindowId, control: Option<ControlId>) {
        self.focus_request = Some((window, control));
    }

    /// Take the pending focus request, if any.
    pub(crate) fn take_focus_request(&mut self) -> Option<(WindowId, Option<ControlId>)> {
        self.focus_request.take()
    }

    // =========================================================================
    // Capture
    // =========================================================================

    /// The capture target and its owning window, if any.
    #[inline]
    pub fn capture(&self) -> Option<(WindowId, ControlId)> {
        self.capture
    }

    /// Route all pointer move/release/wheel events to one control.
    pub fn set_capture(&mut self, window: WindowId, control: ControlId) {
        debug!(target: targets::MANAGER, ?control, "mouse captured");
        self.capture = Some((window, control));
    }

    /// Release the pointer capture.
    pub fn clear_capture(&mut self) {
        if self.capture.take().is_some() {
            debug!(target: targets::MANAGER, "mouse capture released");
        }
    }

    /// Check if a capture target is set.
    #[inline]
    pub fn is_mouse_captured(&self) -> bool {
        self.capture.is_some()
    }

    // =========================================================================
    // Drag
    // =========================================================================

    /// Begin a drag gesture.
    ///
    /// Only one gesture is supported at a time; an already-active payload is
    /// silently replaced (the displaced item is dropped).
    pub fn begin_drag(&mut self, item: Box<dyn Draggable>, source: ControlId) {
        if self.drag.is_some() {
            debug!(target: targets::DRAG, "drag already active, payload replaced");
        }
        self.drag = Some(DragPayload::new(item, source));
    }

    /// The active payload, if any.
    pub fn drag(&self) -> Option<&DragPayload> {
        self.drag.as_ref()
    }

    /// Take the active payload, ending the gesture.
    pub(crate) fn take_drag(&mut self) -> Option<DragPayload> {
        self.drag.take()
    }

    /// Check if a drag gesture is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Last pointer position in screen coordinates.
    #[inline]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Record the pointer position.
    pub(crate) fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Clear all arbitration state (surface teardown).
    pub(crate) fn reset(&mut self) {
        self.focus = None;
        self.capture = None;
        self.drag = None;
        self.focus_request = None;
    }
}

/// Dispatch-time view of the arbiter handed to control event handlers.
///
/// Identifies the control being dispatched to and its owning window, and
/// exposes the arbitration operations a handler may invoke mid-dispatch.
pub struct EventContext<'a> {
    window: WindowId,
    control: ControlId,
    arbiter: &'a mut InputArbiter,
}

impl<'a> EventContext<'a> {
    /// Create a context for dispatching to `control` in `window`.
    pub(crate) fn new(
        window: WindowId,
        control: ControlId,
        arbiter: &'a mut InputArbiter,
    ) -> Self {
        Self {
            window,
            control,
            arbiter,
        }
    }

    /// The window owning the control being dispatched to.
    #[inline]
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// The control being dispatched to.
    #[inline]
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// Last pointer position in screen coordinates.
    #[inline]
    pub fn pointer(&self) -> Point {
        self.arbiter.pointer()
    }

    /// Check if a drag gesture is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.arbiter.is_dragging()
    }

    /// Check if the pointer is captured.
    #[inline]
    pub fn is_mouse_captured(&self) -> bool {
        self.arbiter.is_mouse_captured()
    }

    /// Capture the pointer for this control.
    pub fn capture_mouse(&mut self) {
        self.arbiter.set_capture(self.window, self.control);
    }

    /// Release the pointer capture.
    pub fn release_mouse(&mut self) {
        self.arbiter.clear_capture();
    }

    /// Start a drag gesture with this control as the source.
    ///
    /// The caller surrenders the item (typically taken from its own
    /// drag-source slot first).
    pub fn start_dragging(&mut self, item: Box<dyn Draggable>) {
        self.arbiter.begin_drag(item, self.control);
    }

    /// Request keyboard focus for this control.
    ///
    /// Applied by the manager once the in-flight dispatch unwinds.
    pub fn request_focus(&mut self) {
        self.arbiter.request_focus(self.window, Some(self.control));
    }

    /// Request that focus be cleared.
    pub fn clear_focus(&mut self) {
        self.arbiter.request_focus(self.window, None);
    }
}
