//! Signals and slots.
//!
//! A [`Signal`] holds a list of slots (closures) and calls each of them when
//! it is emitted. Widgets expose their notifications as public `Signal`
//! fields; a selector's `current_index_changed`, for instance, is connected
//! to one of the panel's update slots.
//!
//! Emission is synchronous: every connected slot runs on the emitting thread
//! before [`Signal::emit`] returns, in connection order. Slots are cloned out
//! of the connection list before any of them runs, so a slot may connect to
//! or disconnect from the signal that is invoking it.
//!
//! ```
//! use lineedits_core::Signal;
//!
//! let current_text_changed = Signal::<String>::new();
//! let id = current_text_changed.connect(|label| println!("now showing {label}"));
//!
//! current_text_changed.emit("Password".to_string());
//! assert!(current_text_changed.disconnect(id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle for one connection, accepted by [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A notification carrying a value of type `Args`.
///
/// Use `()` for signals without a payload and a tuple for several values.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal with nothing connected.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Call `slot` on every future emission.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.slots.lock().insert(Arc::new(slot));
        tracing::trace!(target: targets::SIGNAL, ?id, "slot connected");
        id
    }

    /// Remove a connection. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let removed = self.slots.lock().remove(id).is_some();
        tracing::trace!(target: targets::SIGNAL, ?id, removed, "slot disconnected");
        removed
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Invoke every connected slot with `args`.
    pub fn emit(&self, args: Args) {
        // Release the lock before calling out.
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slot_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("lineedits_core=trace")
            .with_test_writer()
            .try_init();
    }

    fn recorder<T: Clone + Send + 'static>(
        signal: &Signal<T>,
    ) -> (Arc<Mutex<Vec<T>>>, ConnectionId) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = signal.connect(move |value: &T| sink.lock().push(value.clone()));
        (seen, id)
    }

    #[test]
    fn test_emit_reaches_connected_slot() {
        init_tracing();
        let index_changed = Signal::<i32>::new();
        let (seen, _) = recorder(&index_changed);

        index_changed.emit(2);
        index_changed.emit(-1);

        assert_eq!(*seen.lock(), vec![2, -1]);
    }

    #[test]
    fn test_disconnected_slot_is_not_called() {
        init_tracing();
        let index_changed = Signal::<i32>::new();
        let (seen, id) = recorder(&index_changed);

        index_changed.emit(0);
        assert!(index_changed.disconnect(id));
        assert!(!index_changed.disconnect(id));
        index_changed.emit(1);

        assert_eq!(*seen.lock(), vec![0]);
        assert_eq!(index_changed.connection_count(), 0);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let finished = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for control in ["echo", "validator", "alignment"] {
            let order = Arc::clone(&order);
            finished.connect(move |_| order.lock().push(control));
        }

        finished.emit(());
        assert_eq!(*order.lock(), ["echo", "validator", "alignment"]);
        assert_eq!(finished.connection_count(), 3);
    }

    #[test]
    fn test_slot_may_disconnect_itself() {
        let index_changed = Arc::new(Signal::<i32>::new());
        let own_id = Arc::new(Mutex::new(None));
        let calls = Arc::new(Mutex::new(0));

        let weak = Arc::downgrade(&index_changed);
        let id = index_changed.connect({
            let own_id = Arc::clone(&own_id);
            let calls = Arc::clone(&calls);
            move |_| {
                *calls.lock() += 1;
                if let (Some(signal), Some(id)) = (weak.upgrade(), *own_id.lock()) {
                    signal.disconnect(id);
                }
            }
        });
        *own_id.lock() = Some(id);

        index_changed.emit(1);
        index_changed.emit(2);
        assert_eq!(*calls.lock(), 1);
    }

    #[test]
    fn test_tuple_payload() {
        let option_chosen = Signal::<(String, i32)>::new();
        let (seen, _) = recorder(&option_chosen);

        option_chosen.emit(("echo".to_string(), 2));
        assert_eq!(*seen.lock(), vec![("echo".to_string(), 2)]);
    }
}
