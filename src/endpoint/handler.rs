//! Endpoint trait
//!
//! An endpoint declares the verbs it implements via `methods()` and
//! overrides the matching handler functions. The dispatcher never calls a
//! handler for a verb missing from `methods()`. A verb that is declared but
//! not overridden answers the same 405 the dispatcher would, `Allow` list
//! included.

use serde_json::Value;

use super::base::EndpointBase;
use super::errors::EndpointResult;
use super::method::Method;
use crate::protocol::{Request, Response};

pub trait Endpoint: Send + Sync {
    /// Verbs this endpoint implements
    fn methods(&self) -> &'static [Method];

    /// Overrides the configured JSON-only mode for this endpoint
    fn json_only(&self) -> Option<bool> {
        None
    }

    fn get(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        Ok(base.method_not_allowed(request, self.methods()))
    }

    fn put(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        Ok(base.method_not_allowed(request, self.methods()))
    }

    fn post(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        Ok(base.method_not_allowed(request, self.methods()))
    }

    fn delete(&self, base: &EndpointBase, request: &Request) -> EndpointResult<Response> {
        Ok(base.method_not_allowed(request, self.methods()))
    }

    /// Fill in defaulted fields of a JSON document before it is returned
    /// or stored. Identity unless overridden.
    fn populate_defaults(&self, _request: &Request, value: Value) -> Value {
        value
    }
}
