//! Mullion: a retained-mode windowing and control core for embedding in a
//! host application's render/input loop.
//!
//! Mullion owns a tree of visual controls, routes pointer and keyboard
//! events through that tree, arbitrates keyboard focus and pointer capture
//! across possibly-multiple windows, and implements a drag-and-drop protocol
//! between controls. It renders nothing itself: the host supplies a
//! [`PaintSurface`](control::PaintSurface) and pumps input through one of
//! the windows-manager variants each tick.
//!
//! Start with [`window::SingleWindowManager`] or
//! [`window::MultiWindowManager`], build controls into
//! [`control::ControlTree`], and wrap a root container in a window.

pub mod control;
pub mod layout;
pub mod prelude;
pub mod window;

pub use mullion_core::{Color, Insets, Point, Rect, Signal, Size};

#[cfg(test)]
mod tests;
