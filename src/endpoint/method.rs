//! Request verbs an endpoint can implement

use std::fmt;

/// Verb capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    /// All capabilities, in `Allow` header order
    pub const ALL: [Method; 4] = [Method::Get, Method::Put, Method::Post, Method::Delete];

    /// Case-insensitive verb lookup
    pub fn parse(verb: &str) -> Option<Method> {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "PUT" => Some(Method::Put),
            "POST" => Some(Method::Post),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `Allow` header value for a capability set
pub fn allow_header(methods: &[Method]) -> String {
    Method::ALL
        .iter()
        .filter(|m| methods.contains(*m))
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
