/// Wildcard tag matching shared by requirement checks, grant lookups and
/// tag queries.
///
/// A pattern may carry one `*` marker:
/// - `TAG` matches `TAG` exactly
/// - `*TAG` matches anything ending in `TAG`
/// - `TAG*` matches anything starting with `TAG`
/// - `PRE*SUF` matches anything starting with `PRE` and ending with `SUF`
///
/// Comparison is case-insensitive. Only the first `*` is a marker; later ones
/// are compared literally.
use std::borrow::Cow;

pub const WILDCARD: char = '*';

/// Parsed form of a tag pattern, held in uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPattern {
    Exact(String),
    Prefix(String),
    Suffix(String),
    Infix { prefix: String, suffix: String },
    Any,
}

impl TagPattern {
    pub fn parse(pattern: &str) -> Self {
        let upper = pattern.trim().to_uppercase();
        let Some((head, tail)) = upper.split_once(WILDCARD) else {
            return TagPattern::Exact(upper);
        };
        match (head.is_empty(), tail.is_empty()) {
            (true, true) => TagPattern::Any,
            (true, false) => TagPattern::Suffix(tail.to_string()),
            (false, true) => TagPattern::Prefix(head.to_string()),
            (false, false) => TagPattern::Infix {
                prefix: head.to_string(),
                suffix: tail.to_string(),
            },
        }
    }

    /// Test one candidate. The candidate is uppercased only when it is not
    /// already.
    pub fn is_match(&self, candidate: &str) -> bool {
        let candidate = normalize(candidate);
        let candidate = candidate.as_ref();
        match self {
            TagPattern::Exact(tag) => candidate == tag,
            TagPattern::Prefix(prefix) => candidate.starts_with(prefix.as_str()),
            TagPattern::Suffix(suffix) => candidate.ends_with(suffix.as_str()),
            TagPattern::Infix { prefix, suffix } => {
                candidate.len() >= prefix.len() + suffix.len()
                    && candidate.starts_with(prefix.as_str())
                    && candidate.ends_with(suffix.as_str())
            }
            TagPattern::Any => true,
        }
    }

    /// Position of the first candidate matching this pattern.
    pub fn position<S: AsRef<str>>(&self, candidates: &[S]) -> Option<usize> {
        candidates.iter().position(|c| self.is_match(c.as_ref()))
    }

    pub fn is_wildcard(&self) -> bool {
        !matches!(self, TagPattern::Exact(_))
    }
}

fn normalize(tag: &str) -> Cow<'_, str> {
    if tag.chars().any(|c| c.is_lowercase()) {
        Cow::Owned(tag.to_uppercase())
    } else {
        Cow::Borrowed(tag)
    }
}

/// True if any candidate matches `pattern`.
pub fn matches<S: AsRef<str>>(pattern: &str, candidates: &[S]) -> bool {
    matches_with_index(pattern, candidates).is_some()
}

/// Index of the first candidate matching `pattern`, if any.
pub fn matches_with_index<S: AsRef<str>>(pattern: &str, candidates: &[S]) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    TagPattern::parse(pattern).position(candidates)
}

/// Exact, case-insensitive membership with no wildcard interpretation.
pub fn contains_exact<S: AsRef<str>>(tag: &str, candidates: &[S]) -> bool {
    let tag = tag.trim().to_uppercase();
    candidates.iter().any(|c| normalize(c.as_ref()) == tag.as_str())
}
