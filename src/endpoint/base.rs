//! Endpoint base and request dispatch
//!
//! `EndpointBase` is the shared context every endpoint receives: config,
//! store, ACL layout, and the response builder. `handle` is the dispatch
//! entry point.
//!
//! # Dispatch order
//!
//! 1. API version negotiation (406 JSON)
//! 2. Verb check against the endpoint's capabilities (405 text + Allow)
//! 3. Accept negotiation in JSON-only mode (406 text)
//! 4. Endpoint handler; `EndpointError::Protocol` is rendered here, any
//!    other error is returned to the caller

use std::sync::Arc;

use serde_json::{Map, Value};

use super::access::DataAccess;
use super::errors::{EndpointError, EndpointResult};
use super::handler::Endpoint;
use super::method::{allow_header, Method};
use super::uri::UriBuilder;
use crate::acl::{AclPathDeriver, OrgAclPaths};
use crate::config::ServerConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::protocol::response::ALLOW_HEADER;
use crate::protocol::{accepts, check_api_version, JsonOptions, Request, Response, ResponseBuilder};
use crate::store::DataStore;

/// Shared endpoint context
#[derive(Debug, Clone)]
pub struct EndpointBase {
    config: Arc<ServerConfig>,
    store: Arc<dyn DataStore>,
    acl_paths: Arc<dyn AclPathDeriver>,
    responses: ResponseBuilder,
    uris: UriBuilder,
}

impl EndpointBase {
    /// Create a base using the default ACL layout
    pub fn new(config: Arc<ServerConfig>, store: Arc<dyn DataStore>) -> Self {
        Self::with_acl_paths(config, store, Arc::new(OrgAclPaths))
    }

    /// Create a base with a custom ACL layout
    pub fn with_acl_paths(
        config: Arc<ServerConfig>,
        store: Arc<dyn DataStore>,
        acl_paths: Arc<dyn AclPathDeriver>,
    ) -> Self {
        Self {
            responses: ResponseBuilder::from_config(&config),
            uris: UriBuilder::new(config.single_org.clone()),
            config,
            store,
            acl_paths,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn DataStore {
        self.store.as_ref()
    }

    pub fn acl_paths(&self) -> &dyn AclPathDeriver {
        self.acl_paths.as_ref()
    }

    pub fn responses(&self) -> &ResponseBuilder {
        &self.responses
    }

    /// Data access facade over the configured store
    pub fn data(&self) -> DataAccess<'_> {
        DataAccess::new(self)
    }

    /// Dispatch `request` to `endpoint`
    ///
    /// Never returns `EndpointError::Protocol`: those become responses.
    pub fn handle(&self, endpoint: &dyn Endpoint, request: &Request) -> EndpointResult<Response> {
        if let Some(rejection) = check_api_version(
            request.declared_api_version(),
            request.requestor(),
            &self.responses,
        ) {
            log_event_with_fields(
                Event::VersionRejected,
                &[
                    ("path", request.raw_path()),
                    ("version", request.declared_api_version().unwrap_or("")),
                ],
            );
            return Ok(rejection);
        }

        let allowed = endpoint.methods();
        let method = match Method::parse(request.method()) {
            Some(method) if allowed.contains(&method) => method,
            _ => return Ok(self.method_not_allowed(request, allowed)),
        };

        let json_only = endpoint.json_only().unwrap_or(self.config.json_only);
        if json_only && !accepts(request.accept(), "application", "json") {
            log_event_with_fields(
                Event::NotAcceptable,
                &[("path", request.raw_path()), ("accept", request.accept().unwrap_or(""))],
            );
            return Ok(self.text_response(406, "Must accept application/json"));
        }

        let result = match method {
            Method::Get => endpoint.get(self, request),
            Method::Put => endpoint.put(self, request),
            Method::Post => endpoint.post(self, request),
            Method::Delete => endpoint.delete(self, request),
        };

        match result {
            Err(EndpointError::Protocol(err)) => {
                let status = err.status_code().to_string();
                log_event_with_fields(
                    Event::ProtocolError,
                    &[
                        ("path", request.raw_path()),
                        ("status", &status),
                        ("message", err.message()),
                    ],
                );
                Ok(self.error(err.status_code(), err.message()))
            }
            other => other,
        }
    }

    /// 405 plain-text response with `Allow` listing `allowed`
    pub fn method_not_allowed(&self, request: &Request, allowed: &[Method]) -> Response {
        log_event_with_fields(
            Event::MethodRejected,
            &[("path", request.raw_path()), ("method", request.method())],
        );
        self.text_response(
            405,
            format!(
                "Bad request method for '{}': {}",
                request.raw_path(),
                request.method()
            ),
        )
        .with_header(ALLOW_HEADER, allow_header(allowed))
    }

    /// `{"error": [message]}` response
    pub fn error(&self, status: u16, message: &str) -> Response {
        self.responses.error(status, message)
    }

    /// JSON response with the given version pair
    pub fn json_response(
        &self,
        status: u16,
        payload: &Value,
        request_version: i64,
        response_version: i64,
        options: &JsonOptions,
    ) -> Response {
        self.responses
            .json_response(status, payload, request_version, response_version, options)
    }

    /// JSON response echoing the request's API version
    pub fn json_reply(&self, status: u16, request: &Request, payload: &Value) -> Response {
        let version = request.api_version();
        self.json_response(status, payload, version, version, &JsonOptions::default())
    }

    /// Response around pre-encoded JSON text
    pub fn already_json_response(
        &self,
        status: u16,
        json_text: impl Into<String>,
        request_version: i64,
        response_version: i64,
    ) -> Response {
        self.responses
            .already_json_response(status, json_text, request_version, response_version, &[])
    }

    /// Plain-text response
    pub fn text_response(&self, status: u16, text: impl Into<String>) -> Response {
        self.responses.text_response(status, text)
    }

    /// Render the URI of `path` for this deployment mode
    ///
    /// # Panics
    ///
    /// In single-org mode when `path` is outside the configured organization.
    pub fn build_uri(&self, base_uri: &str, path: &[String]) -> String {
        self.uris.build(base_uri, path)
    }

    /// Map each child name under the request path to its URI
    pub fn hashify_list(&self, request: &Request, names: &[String]) -> Value {
        let mut child = request.rest_path().to_vec();
        let map: Map<String, Value> = names
            .iter()
            .map(|name| {
                child.push(name.clone());
                let uri = self.build_uri(request.base_uri(), &child);
                child.pop();
                (name.clone(), Value::String(uri))
            })
            .collect();
        Value::Object(map)
    }
}
