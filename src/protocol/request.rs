//! Inbound request model
//!
//! Built once by the transport adapter (or a test) and only ever borrowed
//! during dispatch.

use serde_json::Value;

/// Inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    rest_path: Vec<String>,
    raw_path: String,
    api_version: Option<String>,
    accept: Option<String>,
    requestor: Option<String>,
    base_uri: String,
    body: Option<String>,
}

impl Request {
    /// Create a request for `method` on `rest_path`
    pub fn new<I, S>(method: impl Into<String>, rest_path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rest_path: Vec<String> = rest_path.into_iter().map(Into::into).collect();
        let raw_path = format!("/{}", rest_path.join("/"));
        Self {
            method: method.into(),
            rest_path,
            raw_path,
            api_version: None,
            accept: None,
            requestor: None,
            base_uri: String::new(),
            body: None,
        }
    }

    /// Set the declared `X-Ops-Server-API-Version`
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the declared `Accept` header
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Set the requestor identity
    pub fn with_requestor(mut self, requestor: impl Into<String>) -> Self {
        self.requestor = Some(requestor.into());
        self
    }

    /// Set the base URI rendered links are built on
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Set the raw request body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Override the raw path shown in diagnostics
    pub fn with_raw_path(mut self, raw_path: impl Into<String>) -> Self {
        self.raw_path = raw_path.into();
        self
    }

    /// Verb as sent by the client
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Resource path segments
    pub fn rest_path(&self) -> &[String] {
        &self.rest_path
    }

    /// Path as the client sent it
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// Declared API version header, verbatim
    pub fn declared_api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Effective API version (0 when undeclared)
    ///
    /// Only meaningful after version negotiation has accepted the request.
    pub fn api_version(&self) -> i64 {
        self.api_version
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Declared `Accept` header, verbatim
    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    /// Requestor identity
    pub fn requestor(&self) -> Option<&str> {
        self.requestor.as_deref()
    }

    /// Base URI for rendered links
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Raw body text
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Body decoded as JSON; a missing body is a decode error
    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(self.body.as_deref().unwrap_or(""))
    }
}
