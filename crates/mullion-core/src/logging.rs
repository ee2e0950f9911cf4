//! Logging facilities for Mullion.
//!
//! Mullion uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! The constants in [`targets`] identify the emitting subsystem and can be
//! used in `tracing` filter directives, e.g.
//! `RUST_LOG=mullion::manager=debug,mullion::tree=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Control tree structure and dispatch.
    pub const TREE: &str = "mullion::tree";
    /// Window lifecycle and per-tick refresh.
    pub const WINDOW: &str = "mullion::window";
    /// Windows manager input routing.
    pub const MANAGER: &str = "mullion::manager";
    /// Focus arbitration.
    pub const FOCUS: &str = "mullion::focus";
    /// Drag-and-drop gestures.
    pub const DRAG: &str = "mullion::drag";
    /// Layout invalidation and engine runs.
    pub const LAYOUT: &str = "mullion::layout";
    /// Signal connection and emission bookkeeping.
    pub const SIGNAL: &str = "mullion::signal";
}
