//! opsrest - Versioned REST endpoint base
//!
//! Shared machinery for JSON REST endpoints over a hierarchical data store:
//! API version negotiation, content negotiation, verb dispatch, and a data
//! access facade that turns store failures into HTTP errors.

pub mod acl;
pub mod config;
pub mod endpoint;
pub mod http;
pub mod observability;
pub mod protocol;
pub mod router;
pub mod store;
