use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use rustc_hash::FxHashMap;

use super::listener::ChangeListener;

/// Monotonic identifier for one registration with the broadcast layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

// Listeners are individually shared so delivery can run without holding the
// registry lock, keeping cancellation from inside a callback deadlock-free.
pub(crate) type SharedListener = Arc<Mutex<Box<dyn ChangeListener>>>;
pub(crate) type ListenerMap = FxHashMap<SubscriptionId, SharedListener>;

/// Handle to one consumer's registration with a
/// [`TrafficLog`](super::TrafficLog).
///
/// The handle holds only a weak reference to the log's listener registry, so
/// it outliving the log is harmless. Dropping the handle does NOT cancel the
/// registration; cancellation is explicit and idempotent, and takes effect
/// before the next notification is delivered.
#[derive(Debug)]
#[must_use = "a subscription keeps receiving notifications until cancelled"]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<Mutex<ListenerMap>>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, registry: Weak<Mutex<ListenerMap>>) -> Self {
        Self { id, registry }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stop delivery to this registration. Cancelling twice is a no-op.
    pub fn cancel(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().unwrap().remove(&self.id);
        }
    }

    /// Whether the registration still receives notifications.
    ///
    /// Returns `false` once cancelled or after the owning log is gone.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.lock().unwrap().contains_key(&self.id))
    }
}
