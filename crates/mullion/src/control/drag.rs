//! Drag-and-drop payload types.
//!
//! A drag gesture moves a [`Draggable`] item from a source control to a drop
//! target. The payload pairs the in-flight item with the control it was
//! pulled from; it is owned by the windows manager for the duration of the
//! gesture and always ends up either accepted by a target or pushed back onto
//! its source.
//!
//! The gesture itself is click-driven: a control's press handler takes the
//! item out of its own slot and calls
//! [`EventContext::start_dragging`](super::EventContext::start_dragging); the
//! next pointer-down either drops the item (any button) or cancels the
//! gesture (right button).

use mullion_core::Size;

use super::ControlId;
use super::traits::PaintContext;

/// An item that can travel in a drag gesture.
///
/// The item paints its own representation while dragged; the manager centers
/// it under the pointer using [`size`](Self::size).
pub trait Draggable: Send + Sync {
    /// The painted size of the item, used to center it under the pointer.
    fn size(&self) -> Size;

    /// Paint the item's representation. The context's local space spans
    /// `(0, 0)` to `size()`.
    fn paint(&self, ctx: &mut PaintContext<'_>);
}

/// The transient record of an in-flight drag gesture.
pub struct DragPayload {
    item: Box<dyn Draggable>,
    source: ControlId,
}

impl DragPayload {
    /// Create a payload from an item and the control it was pulled from.
    pub fn new(item: Box<dyn Draggable>, source: ControlId) -> Self {
        Self { item, source }
    }

    /// The item being dragged.
    pub fn item(&self) -> &dyn Draggable {
        self.item.as_ref()
    }

    /// The control the item was pulled from.
    pub fn source(&self) -> ControlId {
        self.source
    }

    /// Consume the payload, yielding the item and its source.
    pub fn into_parts(self) -> (Box<dyn Draggable>, ControlId) {
        (self.item, self.source)
    }
}

impl std::fmt::Debug for DragPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragPayload")
            .field("source", &self.source)
            .field("size", &self.item.size())
            .finish()
    }
}
