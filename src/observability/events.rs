//! Observable events for the endpoint layer
//!
//! Events are explicit and typed. Each maps to a stable name and a
//! severity; the name is what log consumers match on.

use std::fmt;

/// Log severity for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Request lifecycle
    /// Request entered the router
    RequestReceived,
    /// Response produced
    RequestCompleted,
    /// No route matched the request path
    RouteNotFound,

    // Negotiation
    /// Declared API version malformed or out of range
    VersionRejected,
    /// Verb not implemented by the endpoint
    MethodRejected,
    /// Client does not accept JSON
    NotAcceptable,

    // Handler outcomes
    /// Protocol error caught at the dispatch boundary
    ProtocolError,
    /// Non-protocol failure escaped an endpoint
    EndpointFailed,

    // Data access
    /// Companion ACL delete failed and was swallowed
    CompanionDeleteSkipped,

    // HTTP adapter
    /// Request body could not be read
    BodyRejected,
    /// Response header not representable in HTTP
    HeaderDropped,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RequestReceived => "REQUEST_RECEIVED",
            Event::RequestCompleted => "REQUEST_COMPLETED",
            Event::RouteNotFound => "ROUTE_NOT_FOUND",
            Event::VersionRejected => "API_VERSION_REJECTED",
            Event::MethodRejected => "METHOD_NOT_ALLOWED",
            Event::NotAcceptable => "NOT_ACCEPTABLE",
            Event::ProtocolError => "PROTOCOL_ERROR",
            Event::EndpointFailed => "ENDPOINT_FAILED",
            Event::CompanionDeleteSkipped => "ACL_COMPANION_DELETE_SKIPPED",
            Event::BodyRejected => "REQUEST_BODY_REJECTED",
            Event::HeaderDropped => "RESPONSE_HEADER_DROPPED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::CompanionDeleteSkipped => Severity::Trace,
            Event::RequestReceived
            | Event::RequestCompleted
            | Event::VersionRejected
            | Event::MethodRejected
            | Event::NotAcceptable
            | Event::ProtocolError
            | Event::RouteNotFound => Severity::Debug,
            Event::BodyRejected | Event::HeaderDropped => Severity::Warn,
            Event::EndpointFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
