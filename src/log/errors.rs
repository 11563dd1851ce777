use std::io;

use thiserror::Error;

use super::event::EventId;

/// Contract violations raised by [`TrafficLog`](super::TrafficLog) mutations.
///
/// Both variants indicate a bug in the instrumentation layer rather than a
/// transient condition; they are surfaced synchronously and never retried.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("event {0} is already present in the log")]
    DuplicateIdentity(EventId),
    #[error("event {0} is not present in the log")]
    NotFound(EventId),
}

/// Errors a [`ChangeListener`](super::ChangeListener) can report back to the
/// broadcast layer.
///
/// Listener failures are isolated: they are logged at the fault boundary and
/// never propagate into the log or to other subscribers.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("listener endpoint closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("listener failed: {0}")]
    Other(String),
}

impl ListenerError {
    pub fn other(error: impl Into<String>) -> Self {
        Self::Other(error.into())
    }
}
