//! Response model and builders
//!
//! Every JSON response carries the version envelope twice: as discrete
//! headers and as a JSON blob under `X-Ops-Server-API-Version`. Plain-text
//! responses carry only `Content-Type` (plus whatever the caller adds).

use std::fmt::Display;

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ServerConfig;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const ALLOW_HEADER: &str = "Allow";
pub const API_VERSION_HEADER: &str = "X-Ops-Server-API-Version";
pub const MIN_VERSION_HEADER: &str = "X-Ops-Server-API-Min-Version";
pub const MAX_VERSION_HEADER: &str = "X-Ops-Server-API-Max-Version";
pub const REQUEST_VERSION_HEADER: &str = "X-Ops-Server-API-Request-Version";
pub const RESPONSE_VERSION_HEADER: &str = "X-Ops-Server-API-Response-Version";

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Json(String),
    Text(String),
}

impl Body {
    pub fn as_str(&self) -> &str {
        match self {
            Body::Json(s) | Body::Text(s) => s,
        }
    }
}

/// Outbound response: status, ordered headers, body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Body,
}

impl Response {
    /// Plain-text response without version headers
    pub fn text(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![(CONTENT_TYPE_HEADER.to_string(), TEXT_CONTENT_TYPE.to_string())],
            body: Body::Text(text.into()),
        }
    }

    /// Add a header, replacing any existing header of the same name
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn is_json(&self) -> bool {
        matches!(self.body, Body::Json(_))
    }

    /// Body decoded as JSON
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(self.body.as_str())
    }
}

/// Version envelope as embedded in `X-Ops-Server-API-Version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEnvelope {
    pub min_version: String,
    pub max_version: String,
    pub request_version: String,
    pub response_version: String,
}

/// Per-call JSON rendering options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Override the configured pretty-printing
    pub pretty: Option<bool>,

    /// Extra headers merged over the defaults
    pub headers: Vec<(String, String)>,
}

impl JsonOptions {
    /// Single-line JSON
    pub fn compact() -> Self {
        Self {
            pretty: Some(false),
            ..Default::default()
        }
    }

    /// Add an extra header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Renders responses against the configured API version window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseBuilder {
    min_api_version: i64,
    max_api_version: i64,
    pretty: bool,
}

impl ResponseBuilder {
    pub fn new(min_api_version: i64, max_api_version: i64) -> Self {
        Self {
            min_api_version,
            max_api_version,
            pretty: true,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            min_api_version: config.min_api_version,
            max_api_version: config.max_api_version,
            pretty: config.pretty_json,
        }
    }

    pub fn min_api_version(&self) -> i64 {
        self.min_api_version
    }

    pub fn max_api_version(&self) -> i64 {
        self.max_api_version
    }

    /// `{"error": [message]}` with request/response version 0
    pub fn error(&self, status: u16, message: &str) -> Response {
        self.json_response(status, &json!({ "error": [message] }), 0, 0, &JsonOptions::default())
    }

    /// Encode `payload` and wrap it with the version headers
    ///
    /// Versions are usually `i64`; a rejected request version is echoed as
    /// the text the client declared.
    pub fn json_response(
        &self,
        status: u16,
        payload: &Value,
        request_version: impl Display,
        response_version: impl Display,
        options: &JsonOptions,
    ) -> Response {
        let pretty = options.pretty.unwrap_or(self.pretty);
        let text = if pretty {
            serde_json::to_string_pretty(payload)
        } else {
            serde_json::to_string(payload)
        }
        .expect("Value serialization cannot fail");

        self.already_json_response(status, text, request_version, response_version, &options.headers)
    }

    /// Wrap pre-encoded JSON text with the version headers
    pub fn already_json_response(
        &self,
        status: u16,
        json_text: impl Into<String>,
        request_version: impl Display,
        response_version: impl Display,
        extra_headers: &[(String, String)],
    ) -> Response {
        let envelope = self.envelope(request_version, response_version);
        let blob =
            serde_json::to_string(&envelope).expect("VersionEnvelope serialization cannot fail");

        let mut response = Response {
            status,
            headers: vec![
                (CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string()),
                (MIN_VERSION_HEADER.to_string(), envelope.min_version.clone()),
                (MAX_VERSION_HEADER.to_string(), envelope.max_version.clone()),
                (REQUEST_VERSION_HEADER.to_string(), envelope.request_version.clone()),
                (RESPONSE_VERSION_HEADER.to_string(), envelope.response_version.clone()),
                (API_VERSION_HEADER.to_string(), blob),
            ],
            body: Body::Json(json_text.into()),
        };
        for (name, value) in extra_headers {
            response = response.with_header(name.clone(), value.clone());
        }
        response
    }

    /// Plain-text response; no version headers
    pub fn text_response(&self, status: u16, text: impl Into<String>) -> Response {
        Response::text(status, text)
    }

    fn envelope(
        &self,
        request_version: impl Display,
        response_version: impl Display,
    ) -> VersionEnvelope {
        VersionEnvelope {
            min_version: self.min_api_version.to_string(),
            max_version: self.max_api_version.to_string(),
            request_version: request_version.to_string(),
            response_version: response_version.to_string(),
        }
    }
}
