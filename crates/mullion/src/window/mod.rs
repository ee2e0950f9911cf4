//! Windows and the windows-manager variants.
//!
//! A [`Window`] is an independent root of one container tree with its own
//! modal/visibility state and a local memory of its focus control. The
//! manager variants own the windows, the control tree, and the system-wide
//! input arbitration:
//!
//! - [`SingleWindowManager`] for hosts with one UI surface root
//! - [`MultiWindowManager`] for hosts juggling modeless windows and a modal
//!   stack

mod manager;
mod window;

pub use manager::{MultiWindowManager, SingleWindowManager};
pub use window::{Window, WindowId};
