//! Wire protocol
//!
//! Request/response model, version and content negotiation, and the
//! protocol error that endpoint code raises to produce a structured reply.

pub mod content;
pub mod errors;
pub mod request;
pub mod response;
pub mod version;

pub use content::accepts;
pub use errors::{ProtocolError, ProtocolResult};
pub use request::Request;
pub use response::{Body, JsonOptions, Response, ResponseBuilder, VersionEnvelope};
pub use version::{check_api_version, is_canonical_version, parse_api_version};
