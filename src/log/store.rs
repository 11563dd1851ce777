use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use rustc_hash::FxHashMap;

use super::errors::LogError;
use super::event::{EventId, TrafficEvent};
use super::listener::{ChangeListener, ChannelListener, FnListener};
use super::subscription::{ListenerMap, SharedListener, Subscription, SubscriptionId};

/// Notification emitted once per log mutation.
///
/// `Appended` and `Updated` carry the affected event as stored (after
/// timestamp retention); `Cleared` is a full invalidation with no specific
/// event; `Touched` signals "something may have changed" without any mutation
/// of the sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogChange {
    Appended(TrafficEvent),
    Updated(TrafficEvent),
    Cleared,
    Touched,
}

impl LogChange {
    /// The event this change is about, if it is about one.
    pub fn event(&self) -> Option<&TrafficEvent> {
        match self {
            LogChange::Appended(event) | LogChange::Updated(event) => Some(event),
            LogChange::Cleared | LogChange::Touched => None,
        }
    }
}

struct Entries {
    ordered: Vec<TrafficEvent>,
    index: FxHashMap<EventId, usize>,
}

impl Entries {
    fn new() -> Self {
        Self {
            ordered: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

/// Ordered, mutable store of [`TrafficEvent`]s with notification-on-mutation.
///
/// The log is the single source of truth for one logical session: the
/// instrumentation layer appends pending events and amends them in place when
/// their outcome arrives, and viewers read point-in-time snapshots and react
/// to [`LogChange`] notifications. Events are unique by identity and keep
/// their position across updates.
///
/// Every mutating method emits exactly one notification, delivered to every
/// active subscriber before the call returns. The channel carries no backlog:
/// late subscribers call [`snapshot`](TrafficLog::snapshot) for history.
///
/// All methods are synchronous. Mutations serialize behind an internal lock,
/// so the log is safe to share across threads; readers always see a complete
/// sequence.
///
/// # Example
///
/// ```
/// use httptap::log::{LogChange, Request, Response, TrafficEvent, TrafficLog};
///
/// let log = TrafficLog::new();
/// let (subscription, changes) = log.subscribe_channel();
///
/// let event = TrafficEvent::pending(Request::new("GET", "https://example.com/health"));
/// let id = event.id();
/// log.append(event.clone())?;
/// log.update(event.complete(Response::new(200, "OK")))?;
///
/// assert_eq!(log.snapshot().len(), 1);
/// assert!(matches!(changes.recv().unwrap(), LogChange::Appended(e) if e.id() == id));
/// assert!(matches!(changes.recv().unwrap(), LogChange::Updated(e) if e.is_terminal()));
/// subscription.cancel();
/// # Ok::<(), httptap::log::LogError>(())
/// ```
pub struct TrafficLog {
    // Serializes each mutation together with its notification so every
    // subscriber observes changes in mutation order.
    write_lock: Mutex<()>,
    entries: Mutex<Entries>,
    listeners: Arc<Mutex<ListenerMap>>,
    next_subscription: AtomicU64,
}

impl TrafficLog {
    pub fn new() -> Self {
        Self {
            write_lock: Mutex::new(()),
            entries: Mutex::new(Entries::new()),
            listeners: Arc::new(Mutex::new(ListenerMap::default())),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Process-wide default instance, lazily constructed on first access and
    /// torn down with the process.
    ///
    /// Instrumentation that has no session handle of its own records here.
    /// Tests should construct independent instances instead of sharing this
    /// one.
    pub fn shared() -> &'static TrafficLog {
        static SHARED: LazyLock<TrafficLog> = LazyLock::new(TrafficLog::new);
        &SHARED
    }

    /// Add a new event at the end of the sequence.
    ///
    /// Fails with [`LogError::DuplicateIdentity`] if an event with the same
    /// identity is already present; the log is left unchanged. On success the
    /// subscribers receive one [`LogChange::Appended`].
    pub fn append(&self, event: TrafficEvent) -> Result<(), LogError> {
        let _serialized = self.write_lock.lock().unwrap();
        {
            let mut guard = self.entries.lock().unwrap();
            let entries = &mut *guard;
            if entries.index.contains_key(&event.id()) {
                return Err(LogError::DuplicateIdentity(event.id()));
            }
            entries.index.insert(event.id(), entries.ordered.len());
            entries.ordered.push(event.clone());
        }
        self.notify(LogChange::Appended(event));
        Ok(())
    }

    /// Replace the stored event sharing `event`'s identity, preserving its
    /// position and original timestamp.
    ///
    /// Fails with [`LogError::NotFound`] if no such event exists; the log is
    /// left unchanged. On success the subscribers receive one
    /// [`LogChange::Updated`], even when no field actually changed.
    pub fn update(&self, mut event: TrafficEvent) -> Result<(), LogError> {
        let _serialized = self.write_lock.lock().unwrap();
        {
            let mut guard = self.entries.lock().unwrap();
            let entries = &mut *guard;
            let Some(&position) = entries.index.get(&event.id()) else {
                return Err(LogError::NotFound(event.id()));
            };
            event.set_timestamp(entries.ordered[position].timestamp());
            entries.ordered[position] = event.clone();
        }
        self.notify(LogChange::Updated(event));
        Ok(())
    }

    /// Empty the sequence. Subscribers receive one [`LogChange::Cleared`].
    pub fn clear(&self) {
        let _serialized = self.write_lock.lock().unwrap();
        {
            let mut guard = self.entries.lock().unwrap();
            guard.ordered.clear();
            guard.index.clear();
        }
        self.notify(LogChange::Cleared);
    }

    /// Emit a [`LogChange::Touched`] without mutating the sequence.
    ///
    /// Viewers route "re-derive your view" triggers that do not originate
    /// from traffic (a search-box edit, say) through this primitive instead
    /// of updating a sentinel event.
    pub fn touch(&self) {
        let _serialized = self.write_lock.lock().unwrap();
        self.notify(LogChange::Touched);
    }

    /// Point-in-time copy of the sequence in insertion order.
    ///
    /// The returned vector never aliases internal storage; subsequent
    /// mutations of the log do not show through.
    pub fn snapshot(&self) -> Vec<TrafficEvent> {
        self.entries.lock().unwrap().ordered.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().ordered.is_empty()
    }

    /// Register a listener to be invoked once per notification, in emission
    /// order, until the returned [`Subscription`] is cancelled.
    ///
    /// Registration carries no replay: only notifications emitted after this
    /// call are delivered.
    pub fn subscribe<L>(&self, listener: L) -> Subscription
    where
        L: ChangeListener + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        let shared: SharedListener = Arc::new(Mutex::new(Box::new(listener)));
        self.listeners.lock().unwrap().insert(id, shared);
        Subscription::new(id, Arc::downgrade(&self.listeners))
    }

    /// Register an infallible closure as a listener.
    pub fn subscribe_fn<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&LogChange) + Send + 'static,
    {
        self.subscribe(FnListener::new(callback))
    }

    /// Register a channel bridge and return its receiving end.
    ///
    /// Useful for viewers that drain changes on their own schedule, including
    /// async ones via `recv_async`.
    pub fn subscribe_channel(&self) -> (Subscription, flume::Receiver<LogChange>) {
        let (tx, rx) = flume::unbounded();
        (self.subscribe(ChannelListener::new(tx)), rx)
    }

    /// Number of currently active registrations.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    // The registry lock is never held across a callback: listeners are
    // snapshotted up front and each delivery re-checks that its registration
    // is still present, so a callback may cancel any subscription (its own
    // included) without deadlocking, and a cancellation that lands mid-fanout
    // suppresses the deliveries that have not happened yet.
    fn notify(&self, change: LogChange) {
        let listeners: Vec<(SubscriptionId, SharedListener)> = {
            let registry = self.listeners.lock().unwrap();
            registry
                .iter()
                .map(|(id, listener)| (*id, Arc::clone(listener)))
                .collect()
        };
        for (id, listener) in listeners {
            if !self.listeners.lock().unwrap().contains_key(&id) {
                continue;
            }
            if let Err(error) = listener.lock().unwrap().on_change(&change) {
                tracing::warn!(subscription = %id, %error, "change listener failed; leaving it subscribed");
            }
        }
    }
}

impl Default for TrafficLog {
    fn default() -> Self {
        Self::new()
    }
}
