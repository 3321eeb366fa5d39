//! Name validators used by endpoints before touching the store

use serde_json::Value;

/// Longest accepted policy name, in characters
pub const MAX_POLICY_NAME_LEN: usize = 255;

const POLICY_NAME_FORBIDDEN: [char; 3] = ['+', ' ', '!'];

/// Whether a JSON value is unusable as a policy name
pub fn policy_name_invalid(name: &Value) -> bool {
    match name {
        Value::String(s) => policy_name_str_invalid(s),
        _ => true,
    }
}

/// Whether a string is unusable as a policy name
pub fn policy_name_str_invalid(name: &str) -> bool {
    name.is_empty()
        || name.chars().count() > MAX_POLICY_NAME_LEN
        || name.contains(POLICY_NAME_FORBIDDEN)
}
