//! Route patterns
//!
//! `/organizations/*/nodes/*` style patterns. `*` matches exactly one
//! segment; `**` matches whatever remains, including nothing.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
    Rest,
}

/// Parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s {
                "*" => Segment::Any,
                "**" => Segment::Rest,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        Self {
            source: pattern.to_string(),
            segments,
        }
    }

    /// Pattern text as registered
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &[String]) -> bool {
        let mut remaining = path.iter();
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Any => {
                    if remaining.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(literal) => match remaining.next() {
                    Some(s) if s == literal => {}
                    _ => return false,
                },
            }
        }
        remaining.next().is_none()
    }
}
