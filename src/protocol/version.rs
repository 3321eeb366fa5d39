//! API version negotiation
//!
//! Runs before method dispatch and content negotiation: a request with an
//! unsupported `X-Ops-Server-API-Version` never reaches endpoint code.

use serde_json::json;

use super::response::{JsonOptions, Response, ResponseBuilder};

/// Error code returned for out-of-range versions
pub const INVALID_VERSION_ERROR: &str = "invalid-x-ops-server-api-version";

/// Whether `raw` is a canonical non-negative integer
///
/// ASCII digits only, no sign, no leading zero unless the whole string is
/// "0". Length is unbounded: "99999999999999999999" is canonical.
pub fn is_canonical_version(raw: &str) -> bool {
    !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'))
}

/// Parse a declared version that is canonical and fits an `i64`
///
/// "01", "+1", "1.5" and "-1" are rejected, as are canonical values too
/// large to represent.
pub fn parse_api_version(raw: &str) -> Option<i64> {
    if !is_canonical_version(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Check the declared version against the configured window
///
/// Returns `None` when the request may proceed, or the 406 response to send.
/// Out-of-range versions are echoed as declared, so values beyond `i64`
/// still report the digits the client sent.
pub fn check_api_version(
    declared: Option<&str>,
    requestor: Option<&str>,
    responses: &ResponseBuilder,
) -> Option<Response> {
    let raw = declared?;

    if !is_canonical_version(raw) {
        return Some(responses.json_response(
            406,
            &json!({ "username": requestor }),
            -1,
            -1,
            &JsonOptions::default(),
        ));
    }

    let (min, max) = (responses.min_api_version(), responses.max_api_version());
    match parse_api_version(raw) {
        Some(version) if version >= min && version <= max => None,
        _ => {
            let payload = json!({
                "error": INVALID_VERSION_ERROR,
                "message": format!("Specified version {} not supported", raw),
                "min_api_version": min,
                "max_api_version": max,
            });
            Some(responses.json_response(406, &payload, raw, -1, &JsonOptions::default()))
        }
    }
}
