//! Convenience re-exports for host applications.
//!
//! ```ignore
//! use mullion::prelude::*;
//! ```

pub use mullion_core::{Color, Insets, Point, Rect, Signal, Size};

pub use crate::control::{
    Control, ControlBase, ControlEvent, ControlId, ControlTree, DragPayload, Draggable,
    EventContext, Key, KeyboardModifiers, MouseButton, PaintContext, PaintSurface,
};
pub use crate::layout::{BoxLayout, LayoutContext, LayoutEngine, Orientation};
pub use crate::window::{MultiWindowManager, SingleWindowManager, Window, WindowId};
