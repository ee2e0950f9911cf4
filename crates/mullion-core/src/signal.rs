//! Signal/slot system for Mullion.
//!
//! This module provides a type-safe signal/slot mechanism for change
//! notification inside the control tree. Signals are emitted by controls and
//! managers when their state changes, and connected slots (callbacks) are
//! invoked in response.
//!
//! Unlike general-purpose signal buses, invocation here is always *direct*:
//! the framework is single-threaded and cooperative, driven entirely by the
//! host's render/input loop, so a slot runs to completion inside the emitting
//! call. There is no queueing and no cross-thread delivery.
//!
//! # Example
//!
//! ```
//! use mullion_core::Signal;
//!
//! let bounds_changed = Signal::<f32>::new();
//!
//! let conn_id = bounds_changed.connect(|width| {
//!     println!("new width: {width}");
//! });
//!
//! bounds_changed.emit(120.0);
//! bounds_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke.
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked immediately with
/// a reference to the provided arguments, in an unspecified order.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple for multiple arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        connections.insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Connect a slot and receive an RAII guard that disconnects on drop.
    pub fn connect_guarded<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: Some(self.connect(slot)),
        }
    }

    /// Disconnect a previously connected slot.
    ///
    /// Returns `true` if the connection existed and was removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Emit the signal, invoking every connected slot with `args`.
    ///
    /// Slots connected or disconnected from inside a running slot take effect
    /// on the next emission; the current emission operates on a snapshot.
    pub fn emit(&self, args: Args) {
        if self.blocked.load(Ordering::Relaxed) {
            tracing::trace!(target: crate::logging::targets::SIGNAL, "emission while blocked");
            return;
        }

        // Snapshot the slots so a handler may connect/disconnect re-entrantly.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            connections.values().map(|c| Arc::clone(&c.slot)).collect()
        };

        for slot in slots {
            slot(&args);
        }
    }

    /// Temporarily prevent the signal from invoking its slots.
    ///
    /// Returns the previous blocked state.
    pub fn block(&self) -> bool {
        self.blocked.swap(true, Ordering::Relaxed)
    }

    /// Re-enable slot invocation after [`block`](Self::block).
    pub fn unblock(&self) {
        self.blocked.store(false, Ordering::Relaxed);
    }

    /// Check if the signal is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::Relaxed)
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Check if the signal has no connected slots.
    pub fn is_empty(&self) -> bool {
        self.connections.lock().is_empty()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::Relaxed))
            .finish()
    }
}

/// RAII guard for a signal connection.
///
/// The connection is disconnected when the guard is dropped. Call
/// [`release`](Self::release) to keep the connection alive instead.
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: Option<ConnectionId>,
}

impl<'a, Args: 'static> ConnectionGuard<'a, Args> {
    /// Get the underlying connection ID.
    pub fn id(&self) -> Option<ConnectionId> {
        self.id
    }

    /// Detach the guard, leaving the connection in place permanently.
    pub fn release(mut self) -> ConnectionId {
        self.id.take().expect("guard already released")
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.signal.disconnect(id);
        }
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn emit_invokes_connected_slots() {
        let signal = Signal::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count2 = Arc::clone(&count);
        signal.connect(move |value| {
            assert_eq!(*value, 7);
            count2.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(7);
        signal.emit(7);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn disconnect_stops_delivery() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count2 = Arc::clone(&count);
        let id = signal.connect(move |_| {
            count2.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn blocked_signal_swallows_emissions() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count2 = Arc::clone(&count);
        signal.connect(move |_| {
            count2.fetch_add(1, Ordering::SeqCst);
        });

        signal.block();
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.unblock();
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_disconnects_on_drop() {
        let signal = Signal::<()>::new();
        {
            let _guard = signal.connect_guarded(|_| {});
            assert_eq!(signal.connection_count(), 1);
        }
        assert_eq!(signal.connection_count(), 0);
    }
}
