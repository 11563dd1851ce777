//! # httptap: In-process HTTP Traffic Log
//!
//! httptap records the outbound requests, responses, and errors observed by an
//! instrumented HTTP client and exposes them to live, filterable viewers. The
//! crate is the state core of such a viewer: an ordered, mutable event log
//! with change notifications, a pure query layer, and the small time-driven
//! state machines a live view needs. Interception and rendering stay outside;
//! they talk to the log through its public contract.
//!
//! ## Core Concepts
//!
//! - **Events**: One [`log::TrafficEvent`] per exchange, created pending and
//!   amended in place exactly once when its outcome arrives
//! - **Log**: The [`log::TrafficLog`] owns the ordered sequence and emits one
//!   [`log::LogChange`] per mutation
//! - **Subscriptions**: Cancellable [`log::Subscription`] handles fanning
//!   notifications out to [`log::ChangeListener`]s
//! - **Filtering**: [`filter::filter`] derives a view by substring match over
//!   request URIs
//! - **Presentation**: [`view::ActivityBlinker`] and [`view::elapsed_label`]
//!   turn notifications and wall-clock time into render-ready signals
//!
//! ## Quick Start
//!
//! ### Recording traffic
//!
//! ```
//! use httptap::log::{Request, Response, TrafficEvent, TrafficLog};
//!
//! let log = TrafficLog::new();
//!
//! // Instrumentation observes a request going out...
//! let event = TrafficEvent::pending(
//!     Request::new("GET", "https://api.example.com/users").with_header("accept", "application/json"),
//! );
//! let pending = event.clone();
//! log.append(event)?;
//!
//! // ...and amends the same event when the response lands.
//! log.update(pending.complete(Response::new(200, "OK")))?;
//!
//! let events = log.snapshot();
//! assert_eq!(events.len(), 1);
//! assert!(events[0].is_terminal());
//! # Ok::<(), httptap::log::LogError>(())
//! ```
//!
//! ### Watching for changes
//!
//! ```
//! use httptap::log::{LogChange, Request, TrafficEvent, TrafficLog};
//!
//! let log = TrafficLog::new();
//! let (subscription, changes) = log.subscribe_channel();
//!
//! log.append(TrafficEvent::pending(Request::new("GET", "https://example.com")))?;
//! assert!(matches!(changes.recv().unwrap(), LogChange::Appended(_)));
//!
//! // A viewer unsubscribes on teardown.
//! subscription.cancel();
//! # Ok::<(), httptap::log::LogError>(())
//! ```
//!
//! ### Driving a live view
//!
//! ```
//! use httptap::filter::filter;
//! use httptap::log::{Request, TrafficEvent, TrafficLog};
//! use httptap::view::ActivityBlinker;
//!
//! let log = TrafficLog::new();
//! let mut blinker = ActivityBlinker::new();
//!
//! let _subscription = log.subscribe_fn(move |_change| {
//!     // In a real viewer this nudges the blinker owned by the view and
//!     // schedules a redraw.
//! });
//!
//! log.append(TrafficEvent::pending(Request::new("GET", "https://example.com/search")))?;
//! blinker.record_activity();
//!
//! let snapshot = log.snapshot();
//! let visible = filter(&snapshot, "search");
//! assert_eq!(visible.len(), 1);
//! # Ok::<(), httptap::log::LogError>(())
//! ```
//!
//! ## Module Guide
//!
//! - [`log`] - Event model, the traffic log, and the subscription layer
//! - [`filter`] - Pure query layer over log snapshots
//! - [`view`] - Per-viewer blink and elapsed-time state

pub mod filter;
pub mod log;
pub mod view;
