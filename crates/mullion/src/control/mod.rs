//! The control system: tree, base state, events, and input arbitration.
//!
//! A *control* is a positioned, paintable, hit-testable node. Controls live
//! in a [`ControlTree`] arena and are addressed by [`ControlId`] handles; the
//! arena owns every control, a container node stores child handles, and each
//! node keeps a non-owning parent handle.
//!
//! # Creating a control
//!
//! 1. Define a struct with a [`ControlBase`] field
//! 2. Implement the [`Control`] trait (two required accessors)
//! 3. Override `paint`/`event` and the capability methods as needed
//!
//! ```ignore
//! use mullion::control::{Control, ControlBase, EventContext, ControlEvent};
//!
//! struct Button {
//!     base: ControlBase,
//!     pressed: bool,
//! }
//!
//! impl Control for Button {
//!     fn control_base(&self) -> &ControlBase { &self.base }
//!     fn control_base_mut(&mut self) -> &mut ControlBase { &mut self.base }
//!
//!     fn event(&mut self, event: &mut ControlEvent, _ctx: &mut EventContext<'_>) -> bool {
//!         match event {
//!             ControlEvent::MousePress(_) => {
//!                 self.pressed = true;
//!                 true
//!             }
//!             ControlEvent::MouseRelease(_) => {
//!                 self.pressed = false;
//!                 true
//!             }
//!             _ => false,
//!         }
//!     }
//! }
//! ```
//!
//! # Coordinate systems
//!
//! - **Local**: origin at the control's top-left corner
//! - **Parent**: the space the control's `bounds` live in
//! - **Screen**: the host surface; reachable in O(1) from any control via its
//!   eagerly maintained `origin`

mod arbiter;
mod base;
mod drag;
mod events;
mod traits;
mod tree;

pub use arbiter::{EventContext, InputArbiter};
pub use base::{ControlBase, NO_TAB_INDEX};
pub use drag::{DragPayload, Draggable};
pub use events::{
    CharEvent, ControlEvent, DestroyedEvent, EnterEvent, EventBase, FocusInEvent, FocusOutEvent,
    Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, LeaveEvent, MouseButton,
    MouseMoveEvent, MousePressEvent, MouseReleaseEvent, ThemeChangedEvent, WheelEvent,
};
pub use traits::{Control, PaintContext, PaintSurface};
pub use tree::{ControlId, ControlTree, TreeError};
