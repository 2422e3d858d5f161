//! Form-body decoding
//!
//! The options form posts PHP-style bracket keys
//! (`extension[general][siteName]=New`). The body arrives as urlencoded
//! pairs; this module parses the bracket paths and splits the pairs into
//! per-set nested submissions. Keys are untrusted: malformed paths are
//! collected, not faulted on.

use crate::options::Submission;
use crate::registry::OptionSet;

/// Form pairs split into per-set submissions
#[derive(Debug, Default)]
pub struct SplitSubmission {
    /// Extension-set submission, when any `extension[..][..]` pair was posted
    pub extension: Option<Submission>,
    /// Theme-set submission, when any `theme[..][..]` pair was posted
    pub theme: Option<Submission>,
    /// Keys that did not parse as `set[tab][field]`
    pub malformed: Vec<String>,
}

impl SplitSubmission {
    /// Take the submission for one set, leaving `None` behind
    pub fn take(&mut self, set: OptionSet) -> Option<Submission> {
        match set {
            OptionSet::Extension => self.extension.take(),
            OptionSet::Theme => self.theme.take(),
        }
    }
}

/// Parse a `set[tab][field]` form key into its three path segments.
///
/// Returns `None` for anything else: missing brackets, wrong arity,
/// unterminated or empty segments, trailing garbage.
pub fn parse_bracket_key(key: &str) -> Option<(&str, &str, &str)> {
    let open = key.find('[')?;
    let set = &key[..open];

    let mut rest = &key[open..];
    let mut segments = [""; 2];
    for segment in &mut segments {
        rest = rest.strip_prefix('[')?;
        let close = rest.find(']')?;
        *segment = &rest[..close];
        rest = &rest[close + 1..];
    }

    if set.is_empty() || segments.iter().any(|s| s.is_empty()) || !rest.is_empty() {
        return None;
    }

    Some((set, segments[0], segments[1]))
}

/// Split decoded form pairs into per-set submissions.
///
/// Later pairs overwrite earlier ones for the same path, which is what makes
/// the hidden-input-then-checkbox pattern for booleans work.
pub fn split_submission(pairs: &[(String, String)]) -> SplitSubmission {
    let mut split = SplitSubmission::default();

    for (key, value) in pairs {
        let Some((set, tab, field)) = parse_bracket_key(key) else {
            split.malformed.push(key.clone());
            continue;
        };

        let submission = match set {
            "extension" => split.extension.get_or_insert_with(Submission::new),
            "theme" => split.theme.get_or_insert_with(Submission::new),
            _ => {
                split.malformed.push(key.clone());
                continue;
            }
        };

        submission
            .entry(tab.to_string())
            .or_default()
            .insert(field.to_string(), value.clone());
    }

    split
}
