//! Episode number extraction.
//!
//! Release filenames rarely agree on a format, so extraction is an ordered
//! list of heuristic rules. Each rule is named and independently testable;
//! the first rule whose capture parses as a number wins.

use regex::Regex;

/// One extraction rule.
pub struct ExtractionRule {
    pub name: &'static str,
    pub pattern: &'static str,
}

/// Ordered extraction rules, tried case-insensitively, first match wins.
///
/// The bare `digit_run` rule matches any digit in the filename, so the
/// rule after it only fires when an earlier capture fails to parse.
pub const EXTRACTION_RULES: &[ExtractionRule] = &[
    ExtractionRule {
        name: "ep_prefix",
        pattern: r"(?i)EP(\d+)",
    },
    ExtractionRule {
        name: "e_prefix",
        pattern: r"(?i)E(\d+)",
    },
    ExtractionRule {
        name: "cjk_episode",
        pattern: r"(?i)第(\d+)集",
    },
    ExtractionRule {
        name: "digit_run",
        pattern: r"(?i)(\d+)",
    },
    ExtractionRule {
        name: "digits_before_dot",
        pattern: r"(?i)(\d+)[a-zA-Z]*\.",
    },
];

/// Extract an episode number from a filename.
///
/// Best-effort and order-sensitive: a filename whose first digit run is a
/// resolution token ("1080p") and that carries no `EP`/`E` marker will
/// extract the resolution. Callers treat the result as a guess to be
/// confirmed against the catalog.
pub fn extract_episode_number(filename: &str) -> Option<u32> {
    for rule in EXTRACTION_RULES {
        if let Ok(re) = Regex::new(rule.pattern) {
            if let Some(caps) = re.captures(filename) {
                if let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                    tracing::debug!("Rule {} matched {:?} -> {}", rule.name, filename, number);
                    return Some(number);
                }
            }
        }
    }

    None
}
