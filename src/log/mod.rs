//! Traffic log core: the event store, its mutation API, and the broadcast
//! subscription layer.
//!
//! The module is organised around an in-process [`TrafficLog`] and helpers
//! for consuming its [`LogChange`] notifications (`ChangeListener`
//! implementations and the [`Subscription`] handle).

pub mod errors;
pub mod event;
pub mod listener;
pub mod store;
pub mod subscription;

pub use errors::{ListenerError, LogError};
pub use event::{Body, EventId, Headers, Outcome, Request, Response, TrafficEvent};
pub use listener::{ChangeListener, ChannelListener, FnListener, MemoryListener};
pub use store::{LogChange, TrafficLog};
pub use subscription::{Subscription, SubscriptionId};
