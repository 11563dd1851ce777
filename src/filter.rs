//! Stateless query layer deriving filtered views of a log snapshot.

use crate::log::TrafficEvent;

/// Case-insensitive substring filter over request URIs.
///
/// Returns the events whose request URI contains `query`, in their original
/// order. An empty query matches everything. The function is pure: it never
/// mutates or reorders the input, and borrows rather than clones so viewers
/// can run it on every keystroke.
///
/// # Example
///
/// ```
/// use httptap::filter::filter;
/// use httptap::log::{Request, TrafficEvent};
///
/// let events = vec![
///     TrafficEvent::pending(Request::new("GET", "https://api.example.com/Users")),
///     TrafficEvent::pending(Request::new("GET", "https://api.example.com/orders")),
/// ];
///
/// let hits = filter(&events, "users");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].request().uri(), "https://api.example.com/Users");
/// assert_eq!(filter(&events, "").len(), 2);
/// ```
pub fn filter<'a>(events: &'a [TrafficEvent], query: &str) -> Vec<&'a TrafficEvent> {
    if query.is_empty() {
        return events.iter().collect();
    }
    let needle = query.to_lowercase();
    events
        .iter()
        .filter(|event| event.request().uri().to_lowercase().contains(&needle))
        .collect()
}
