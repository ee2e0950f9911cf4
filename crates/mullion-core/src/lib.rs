//! Core primitives for the Mullion UI toolkit.
//!
//! This crate provides the foundation layer shared by the Mullion framework
//! crates:
//!
//! - [`geometry`]: points, sizes, rectangles, insets, and colors
//! - [`signal`]: the signal/slot change-notification mechanism
//! - [`logging`]: `tracing` target constants for log filtering
//!
//! Host applications normally depend on the `mullion` crate instead, which
//! re-exports everything here.

pub mod geometry;
pub mod logging;
pub mod signal;

pub use geometry::{Color, Insets, Point, Rect, Size};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
