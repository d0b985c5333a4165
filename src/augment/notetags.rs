/// Annotation parser for augment notetags embedded in item descriptions.
///
/// **Recognized tags** (label is case-insensitive):
/// - `<AUGMENT REQUIRES TAGS: term, term>` - tags the host must carry
/// - `<AUGMENT GRANTS TAGS: term, term>` - tags conferred while installed
/// - `<AUGMENT REJECTION STRING: text>` - shown when the install is declined
///
/// Requirement and grant declarations accumulate. The last rejection string
/// wins. Terms are runs of `[A-Za-z0-9_]` plus the `*` wildcard marker.
use log::{debug, warn};

use super::types::AugmentProfile;
use crate::logutil::escape_log;

const REQUIRES_LABEL: &str = "AUGMENT REQUIRES TAGS";
const GRANTS_LABEL: &str = "AUGMENT GRANTS TAGS";
const REJECTION_LABEL: &str = "AUGMENT REJECTION STRING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notetag {
    Requires(Vec<String>),
    Grants(Vec<String>),
    Rejection(String),
}

/// Split a term list into uppercase terms.
pub fn split_terms(list: &str) -> Vec<String> {
    list.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '*'))
        .filter(|term| !term.is_empty())
        .map(|term| term.to_ascii_uppercase())
        .collect()
}

/// Collapse runs of whitespace and uppercase, so `augment  requires tags`
/// compares equal to the canonical label.
fn canonical_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Extract every augment notetag from `text`, in order of appearance.
pub fn scan_notetags(text: &str) -> Vec<Notetag> {
    let mut found = Vec::new();
    for line in text.lines() {
        let mut rest = line;
        while let Some(open) = rest.find('<') {
            let body = &rest[open + 1..];
            let Some((label, after_colon)) = body.split_once(':') else {
                break;
            };
            // A '>' before the colon closes some unrelated tag.
            if label.contains('>') {
                rest = &body[label.find('>').map_or(0, |i| i + 1)..];
                continue;
            }
            let label = canonical_label(label);
            match label.as_str() {
                REQUIRES_LABEL | GRANTS_LABEL => {
                    let Some(close) = after_colon.find('>') else {
                        warn!("unterminated augment notetag: {}", escape_log(line));
                        break;
                    };
                    let terms = split_terms(&after_colon[..close]);
                    found.push(if label == REQUIRES_LABEL {
                        Notetag::Requires(terms)
                    } else {
                        Notetag::Grants(terms)
                    });
                    rest = &after_colon[close + 1..];
                }
                REJECTION_LABEL => {
                    // Free text may itself contain '>', so take up to the last one on the line.
                    let Some(close) = after_colon.rfind('>') else {
                        warn!("unterminated augment notetag: {}", escape_log(line));
                        break;
                    };
                    found.push(Notetag::Rejection(after_colon[..close].trim().to_string()));
                    rest = &after_colon[close + 1..];
                }
                _ => {
                    rest = body;
                }
            }
        }
    }
    found
}

/// Build an augment profile from an item description.
pub fn parse_augment_notes(text: &str) -> AugmentProfile {
    let mut profile = AugmentProfile::default();
    for tag in scan_notetags(text) {
        match tag {
            Notetag::Requires(terms) => {
                for term in terms {
                    profile.add_requirement(&term);
                }
            }
            Notetag::Grants(terms) => {
                for term in terms {
                    profile.add_granted_tag(&term);
                }
            }
            Notetag::Rejection(text) => profile.set_rejection_string(text),
        }
    }
    if !profile.is_empty() {
        debug!(
            "parsed augment notes: requires={:?} grants={:?} rejection={}",
            profile.requirements(),
            profile.granted_tags(),
            escape_log(profile.rejection_string())
        );
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_requirements_and_grants() {
        let text = "A reckless firmware patch.\n\
                    <Augment Requires Tags: CanFullAuto, Heavy>\n\
                    <AUGMENT GRANTS TAGS: hacked>";
        let profile = parse_augment_notes(text);
        assert_eq!(profile.requirements(), ["CANFULLAUTO", "HEAVY"]);
        assert_eq!(profile.granted_tags(), ["HACKED"]);
        assert_eq!(profile.rejection_string(), "");
    }

    #[test]
    fn declarations_accumulate_without_duplicates() {
        let text = "<augment requires tags: A B>\n<augment requires tags: b, c>";
        let profile = parse_augment_notes(text);
        assert_eq!(profile.requirements(), ["A", "B", "C"]);
    }

    #[test]
    fn last_rejection_string_wins() {
        let text = "<AUGMENT REJECTION STRING: first>\n\
                    <AUGMENT REJECTION STRING:  \\C[2]Needs a full-auto frame!\\C[0] >";
        let profile = parse_augment_notes(text);
        assert_eq!(
            profile.rejection_string(),
            "\\C[2]Needs a full-auto frame!\\C[0]"
        );
    }

    #[test]
    fn wildcard_terms_are_kept() {
        assert_eq!(split_terms("GUN_*, *_AUTO  X"), ["GUN_*", "*_AUTO", "X"]);
    }

    #[test]
    fn unrelated_tags_are_ignored() {
        let text = "<Price: 40> <Augment Type: Chip> <AUGMENT GRANTS TAGS: Silenced>";
        let tags = scan_notetags(text);
        assert_eq!(tags, vec![Notetag::Grants(vec!["SILENCED".to_string()])]);
    }

    #[test]
    fn plain_description_yields_empty_profile() {
        let profile = parse_augment_notes("Just a sturdy rifle.");
        assert!(profile.is_empty());
    }

    #[test]
    fn unterminated_tag_is_skipped() {
        let tags = scan_notetags("<AUGMENT GRANTS TAGS: A, B");
        assert!(tags.is_empty());
    }
}
