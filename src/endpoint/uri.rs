//! Resource URI rendering
//!
//! In single-org mode every path handed to `build` must live under
//! `organizations/<org>`; that prefix is dropped from the rendered URI.
//! A path outside it is a bug in the caller and panics.

/// Render `base_uri/seg1/seg2/...` with no mode-dependent stripping
pub fn build_uri_unscoped(base_uri: &str, path: &[String]) -> String {
    format!("{}/{}", base_uri, path.join("/"))
}

/// Mode-aware URI renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriBuilder {
    single_org: Option<String>,
}

impl UriBuilder {
    pub fn new(single_org: Option<String>) -> Self {
        Self { single_org }
    }

    /// Render the URI of `path`
    ///
    /// # Panics
    ///
    /// In single-org mode, if `path` does not start with
    /// `["organizations", <org>]`.
    pub fn build(&self, base_uri: &str, path: &[String]) -> String {
        let Some(org) = self.single_org.as_deref() else {
            return build_uri_unscoped(base_uri, path);
        };

        match path {
            [first, second, rest @ ..] if first == "organizations" && second == org => {
                build_uri_unscoped(base_uri, rest)
            }
            _ => panic!(
                "Unexpected URL {:?} passed to build_uri in single org mode (org {:?})",
                &path[..path.len().min(2)],
                org
            ),
        }
    }
}
