//! # Path Router
//!
//! Maps a request's rest path to the first endpoint whose pattern matches
//! and dispatches through the shared `EndpointBase`. This is the boundary
//! where non-protocol failures stop: they are logged and answered with a
//! 500 plain-text body.

mod pattern;

pub use pattern::RoutePattern;

use std::sync::Arc;

use uuid::Uuid;

use crate::endpoint::{Endpoint, EndpointBase};
use crate::observability::{log_event_with_fields, Event};
use crate::protocol::{Request, Response};

struct Route {
    pattern: RoutePattern,
    endpoint: Arc<dyn Endpoint>,
}

/// Ordered route table over one `EndpointBase`
pub struct RestRouter {
    base: EndpointBase,
    routes: Vec<Route>,
}

impl RestRouter {
    pub fn new(base: EndpointBase) -> Self {
        Self {
            base,
            routes: Vec::new(),
        }
    }

    /// Register `endpoint` for `pattern`. Earlier routes win.
    pub fn route(mut self, pattern: &str, endpoint: impl Endpoint + 'static) -> Self {
        self.routes.push(Route {
            pattern: RoutePattern::parse(pattern),
            endpoint: Arc::new(endpoint),
        });
        self
    }

    pub fn base(&self) -> &EndpointBase {
        &self.base
    }

    /// Patterns in match order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.pattern.as_str())
    }

    fn find(&self, path: &[String]) -> Option<&dyn Endpoint> {
        self.routes
            .iter()
            .find(|r| r.pattern.matches(path))
            .map(|r| r.endpoint.as_ref())
    }

    /// Dispatch one request
    pub fn call(&self, request: &Request) -> Response {
        let request_id = Uuid::new_v4().to_string();
        log_event_with_fields(
            Event::RequestReceived,
            &[
                ("request_id", &request_id),
                ("method", request.method()),
                ("path", request.raw_path()),
            ],
        );

        let response = match self.find(request.rest_path()) {
            Some(endpoint) => match self.base.handle(endpoint, request) {
                Ok(response) => response,
                Err(err) => {
                    let reason = err.to_string();
                    log_event_with_fields(
                        Event::EndpointFailed,
                        &[("request_id", &request_id), ("error", &reason)],
                    );
                    self.base.text_response(500, format!("Exception raised! {}", reason))
                }
            },
            None => {
                log_event_with_fields(
                    Event::RouteNotFound,
                    &[("request_id", &request_id), ("path", request.raw_path())],
                );
                // Path as the client sent it; single-org prefixes never leak.
                let uri = format!("{}{}", request.base_uri(), request.raw_path());
                self.base.error(404, &format!("Object not found: {}", uri))
            }
        };

        let status = response.status().to_string();
        log_event_with_fields(
            Event::RequestCompleted,
            &[("request_id", &request_id), ("status", &status)],
        );
        response
    }
}
