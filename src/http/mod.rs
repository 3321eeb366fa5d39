//! # HTTP Adapter
//!
//! Glue between axum and the router: builds a `Request` from the incoming
//! HTTP parts and turns our `Response` into an axum response. Serving
//! (binding, TLS, shutdown) belongs to the host process.

use std::sync::Arc;

use axum::body::{to_bytes, Body as AxumBody};
use axum::extract::State;
use axum::http::header::{ACCEPT, HOST};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Router;

use crate::config::ServerConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::protocol::response::API_VERSION_HEADER;
use crate::protocol::{Request, Response};
use crate::router::RestRouter;

/// Header carrying the requestor identity
pub const REQUESTOR_HEADER: &str = "X-Ops-UserId";

/// Largest request body read before dispatch
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = AxumBody::from(self.body().as_str().to_string());
        let mut response = axum::response::Response::new(body);
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in self.headers() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => log_event_with_fields(Event::HeaderDropped, &[("header", name.as_str())]),
            }
        }
        response
    }
}

/// Build a `Request` from HTTP request parts
///
/// In single-org mode the `organizations/<org>` prefix is prepended to the
/// path, so endpoints always see full paths.
pub fn request_from_parts(parts: &Parts, body: &[u8], config: &ServerConfig) -> Request {
    let header = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());

    let segments = parts
        .uri
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let rest_path: Vec<String> = match config.single_org.as_deref() {
        Some(org) => ["organizations".to_string(), org.to_string()]
            .into_iter()
            .chain(segments)
            .collect(),
        None => segments.collect(),
    };

    let base_uri = config
        .base_uri
        .clone()
        .unwrap_or_else(|| format!("http://{}", header(HOST.as_str()).unwrap_or("localhost")));

    let mut request = Request::new(parts.method.as_str(), rest_path)
        .with_raw_path(parts.uri.path())
        .with_base_uri(base_uri);
    if let Some(version) = header(API_VERSION_HEADER) {
        request = request.with_api_version(version);
    }
    if let Some(accept) = header(ACCEPT.as_str()) {
        request = request.with_accept(accept);
    }
    if let Some(requestor) = header(REQUESTOR_HEADER) {
        request = request.with_requestor(requestor);
    }
    if !body.is_empty() {
        request = request.with_body(String::from_utf8_lossy(body).into_owned());
    }
    request
}

impl RestRouter {
    /// axum app dispatching every request through this router
    pub fn into_axum(self) -> Router {
        Router::new().fallback(dispatch).with_state(Arc::new(self))
    }
}

async fn dispatch(
    State(router): State<Arc<RestRouter>>,
    request: axum::extract::Request,
) -> axum::response::Response {
    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => {
            let reason = err.to_string();
            log_event_with_fields(
                Event::BodyRejected,
                &[("path", parts.uri.path()), ("reason", &reason)],
            );
            return Response::text(413, format!("Failed to read request body: {}", reason))
                .into_response();
        }
    };

    let request = request_from_parts(&parts, &bytes, router.base().config());
    router.call(&request).into_response()
}
