//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use httptap::log::{Request, Response, TrafficEvent};

/// A pending GET event for the given URI.
pub fn pending_event(uri: &str) -> TrafficEvent {
    TrafficEvent::pending(Request::new("GET", uri))
}

/// A terminal event: GET `uri` answered with the given status.
pub fn completed_event(uri: &str, status: u16) -> TrafficEvent {
    pending_event(uri).complete(Response::new(status, "OK"))
}

/// A terminal event that failed before any response.
pub fn failed_event(uri: &str, error: &str) -> TrafficEvent {
    pending_event(uri).fail(error)
}

/// Install a test subscriber so listener faults show up in test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("httptap=debug")
        .with_test_writer()
        .try_init();
}
