use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Opaque, stable identity of a recorded traffic exchange.
///
/// Identities are assigned once at construction and never derived from
/// mutable fields, so viewers can use them as stable keys across in-place
/// updates of the same event.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request or response payload. Absence is modelled as `Option<Body>` on the
/// owning struct rather than a variant here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Json(Value),
}

/// Ordered string-to-string header mapping. Insertion order is the wire order
/// reported by the instrumentation layer and is preserved verbatim.
pub type Headers = Vec<(String, String)>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    method: String,
    uri: String,
    headers: Headers,
    body: Option<Body>,
}

impl Request {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    status: u16,
    reason: String,
    headers: Headers,
    body: Option<Body>,
}

impl Response {
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}

/// Borrowed view of an event's terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Request observed, outcome not yet known.
    Pending,
    /// A response arrived.
    Completed(&'a Response),
    /// The exchange failed before a response was produced.
    Failed(&'a str),
}

/// One recorded traffic exchange: a request, its creation instant, and at most
/// one terminal outcome (response or error).
///
/// An event is created pending via [`TrafficEvent::pending`] and transitions
/// to terminal exactly once through [`complete`](TrafficEvent::complete) or
/// [`fail`](TrafficEvent::fail). The timestamp is set at construction and is
/// retained by the log across in-place updates.
///
/// # Example
///
/// ```
/// use httptap::log::{Request, Response, TrafficEvent};
///
/// let pending = TrafficEvent::pending(Request::new("GET", "https://api.example.com/users"));
/// assert!(pending.is_pending());
///
/// let done = pending.complete(Response::new(200, "OK"));
/// assert!(done.is_terminal());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrafficEvent {
    id: EventId,
    timestamp: DateTime<Utc>,
    request: Request,
    response: Option<Response>,
    error: Option<String>,
}

impl TrafficEvent {
    /// Record a newly observed request with a fresh identity and timestamp.
    pub fn pending(request: Request) -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
            request,
            response: None,
            error: None,
        }
    }

    /// Terminal transition: the response arrived. Clears any error.
    pub fn complete(mut self, response: Response) -> Self {
        self.response = Some(response);
        self.error = None;
        self
    }

    /// Terminal transition: the exchange failed. Clears any response.
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self.response = None;
        self
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outcome(&self) -> Outcome<'_> {
        match (&self.response, &self.error) {
            (Some(response), _) => Outcome::Completed(response),
            (None, Some(error)) => Outcome::Failed(error),
            (None, None) => Outcome::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.outcome(), Outcome::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    pub(crate) fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = timestamp;
    }

    /// Convert the event to a structured JSON summary with normalized schema.
    ///
    /// Returns a JSON object with the following structure:
    /// ```json
    /// {
    ///   "id": "9f3c...",
    ///   "timestamp": "2026-08-29T12:34:56.789Z",
    ///   "method": "GET",
    ///   "uri": "https://api.example.com/users",
    ///   "outcome": "pending" | "completed" | "failed",
    ///   "status": 200,
    ///   "error": "connection reset"
    /// }
    /// ```
    /// `status` is present only for completed events, `error` only for failed
    /// ones.
    pub fn to_json_value(&self) -> Value {
        use serde_json::json;

        let mut value = json!({
            "id": self.id.to_string(),
            "timestamp": self.timestamp.to_rfc3339(),
            "method": self.request.method(),
            "uri": self.request.uri(),
        });
        let object = value.as_object_mut().expect("summary is an object");
        match self.outcome() {
            Outcome::Pending => {
                object.insert("outcome".into(), json!("pending"));
            }
            Outcome::Completed(response) => {
                object.insert("outcome".into(), json!("completed"));
                object.insert("status".into(), json!(response.status()));
            }
            Outcome::Failed(error) => {
                object.insert("outcome".into(), json!("failed"));
                object.insert("error".into(), json!(error));
            }
        }
        value
    }
}

impl fmt::Display for TrafficEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.request.method(), self.request.uri())?;
        match self.outcome() {
            Outcome::Pending => write!(f, " (pending)"),
            Outcome::Completed(response) => {
                write!(f, " -> {} {}", response.status(), response.reason())
            }
            Outcome::Failed(error) => write!(f, " !! {error}"),
        }
    }
}
