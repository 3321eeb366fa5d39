//! Accept-header negotiation

/// Whether an `Accept` declaration admits `category/kind`
///
/// A missing declaration accepts anything. Media-type parameters (after `;`)
/// are ignored; `category/*` and `*/*` wildcards match.
pub fn accepts(accept: Option<&str>, category: &str, kind: &str) -> bool {
    let Some(accept) = accept else {
        return true;
    };

    let exact = format!("{}/{}", category, kind);
    let wildcard = format!("{}/*", category);

    accept
        .split(',')
        .map(|entry| entry.split(';').next().unwrap_or("").trim())
        .any(|media| media == exact || media == wildcard || media == "*/*")
}
