use std::sync::{Arc, Mutex};

use super::errors::ListenerError;
use super::store::LogChange;

/// Abstraction over a consumer of log change notifications.
///
/// Implementations decide how to react to a change; the log delivers each
/// notification to every active listener exactly once, in emission order.
/// Returning an error does not cancel the registration: the failure is
/// reported at the fault boundary and delivery to other listeners continues.
pub trait ChangeListener: Send {
    fn on_change(&mut self, change: &LogChange) -> Result<(), ListenerError>;
}

/// Adapter turning a plain closure into a [`ChangeListener`].
///
/// Used by [`TrafficLog::subscribe_fn`](super::TrafficLog::subscribe_fn) for
/// consumers that never fail.
pub struct FnListener<F>(F);

impl<F> FnListener<F>
where
    F: FnMut(&LogChange) + Send,
{
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> ChangeListener for FnListener<F>
where
    F: FnMut(&LogChange) + Send,
{
    fn on_change(&mut self, change: &LogChange) -> Result<(), ListenerError> {
        (self.0)(change);
        Ok(())
    }
}

/// In-memory listener for testing and snapshots.
#[derive(Clone, Default)]
pub struct MemoryListener {
    entries: Arc<Mutex<Vec<LogChange>>>,
}

impl MemoryListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all captured changes.
    pub fn snapshot(&self) -> Vec<LogChange> {
        self.entries.lock().unwrap().clone()
    }

    /// Clear all captured changes.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl ChangeListener for MemoryListener {
    fn on_change(&mut self, change: &LogChange) -> Result<(), ListenerError> {
        self.entries.lock().unwrap().push(change.clone());
        Ok(())
    }
}

/// Channel-based listener for streaming changes to decoupled consumers.
///
/// Changes are forwarded over an unbounded flume channel without blocking, so
/// a viewer can drain them on its own schedule (synchronously or via
/// `recv_async`). Created through
/// [`TrafficLog::subscribe_channel`](super::TrafficLog::subscribe_channel).
pub struct ChannelListener {
    tx: flume::Sender<LogChange>,
}

impl ChannelListener {
    pub fn new(tx: flume::Sender<LogChange>) -> Self {
        Self { tx }
    }
}

impl ChangeListener for ChannelListener {
    fn on_change(&mut self, change: &LogChange) -> Result<(), ListenerError> {
        self.tx
            .send(change.clone())
            .map_err(|_| ListenerError::Closed)
    }
}
