//! # REST Endpoint Base
//!
//! Everything an endpoint shares: dispatch (`EndpointBase::handle`), the
//! data access facade, URI rendering, response helpers and validators.
//!
//! Endpoints implement `Endpoint` for the verbs they support and receive the
//! `EndpointBase` on every call.

pub mod access;
pub mod base;
pub mod errors;
pub mod handler;
pub mod method;
pub mod uri;
pub mod validation;

pub use access::{AccessOptions, DataAccess, FailurePolicy};
pub use base::EndpointBase;
pub use errors::{EndpointError, EndpointResult};
pub use handler::Endpoint;
pub use method::{allow_header, Method};
pub use uri::{build_uri_unscoped, UriBuilder};
pub use validation::{policy_name_invalid, policy_name_str_invalid};
