//! Layer naming conventions.
//!
//! Widgets are discovered purely from bracketed name prefixes:
//! - `#name` prunes the node and its subtree
//! - `[T]name` toggle
//! - `[N]name` number, `[S]name` string
//! - `[D:<n>]name` / `[D:<n>p]name` digit with `n` segments (and a decimal point)
//! - `[R]name` range

use serde::{Deserialize, Serialize};

/// Names starting with this marker are excluded together with their subtree.
pub const PRUNE_MARKER: char = '#';

/// Segment count and decimal-point presence of a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitSpec {
    pub segments: u32,
    pub has_decimal: bool,
}

impl DigitSpec {
    /// Used for malformed specs such as `[D:x]`.
    pub const DEFAULT: DigitSpec = DigitSpec {
        segments: 7,
        has_decimal: false,
    };

    pub fn new(segments: u32, has_decimal: bool) -> Self {
        Self {
            segments,
            has_decimal,
        }
    }

    /// Parse the text between `[D:` and `]`, e.g. `7`, `16p`.
    ///
    /// A non-numeric segment count falls back to [`DigitSpec::DEFAULT`].
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (count, has_decimal) = match spec.strip_suffix('p') {
            Some(count) => (count, true),
            None => (spec, false),
        };

        match count.trim().parse::<u32>() {
            Ok(segments) => Self::new(segments, has_decimal),
            Err(_) => Self::DEFAULT,
        }
    }

    /// Number of layers a well-formed digit group holds.
    pub fn layer_count(&self) -> usize {
        self.segments as usize + usize::from(self.has_decimal)
    }
}

/// A recognized name prefix and the text after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix<'a> {
    Toggle(&'a str),
    Number(&'a str),
    String(&'a str),
    Digit(DigitSpec, &'a str),
    Range(&'a str),
    /// No recognized prefix; the whole name.
    Plain(&'a str),
}

impl<'a> Prefix<'a> {
    /// The name with its prefix removed, trimmed.
    pub fn label(&self) -> &'a str {
        match self {
            Prefix::Toggle(s)
            | Prefix::Number(s)
            | Prefix::String(s)
            | Prefix::Digit(_, s)
            | Prefix::Range(s)
            | Prefix::Plain(s) => s.trim(),
        }
    }
}

/// Classify a name by prefix, in precedence order `[T] [N] [S] [D:..] [R]`.
///
/// Unknown bracket syntax (including an unterminated `[D:`) is plain text.
pub fn parse_prefix(name: &str) -> Prefix<'_> {
    if let Some(rest) = name.strip_prefix("[T]") {
        Prefix::Toggle(rest)
    } else if let Some(rest) = name.strip_prefix("[N]") {
        Prefix::Number(rest)
    } else if let Some(rest) = name.strip_prefix("[S]") {
        Prefix::String(rest)
    } else if let Some(rest) = name.strip_prefix("[D:") {
        match rest.find(']') {
            Some(end) => Prefix::Digit(DigitSpec::parse(&rest[..end]), &rest[end + 1..]),
            None => Prefix::Plain(name),
        }
    } else if let Some(rest) = name.strip_prefix("[R]") {
        Prefix::Range(rest)
    } else {
        Prefix::Plain(name)
    }
}

/// Check for the prune marker.
pub fn is_pruned(name: &str) -> bool {
    name.starts_with(PRUNE_MARKER)
}

/// Make a name safe for file names.
///
/// Anything other than alphanumerics, space, `-` and `_` becomes `_`;
/// the result is trimmed and spaces become `_`.
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    replaced.trim().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digit_spec() {
        assert_eq!(DigitSpec::parse("7"), DigitSpec::new(7, false));
        assert_eq!(DigitSpec::parse("7p"), DigitSpec::new(7, true));
        assert_eq!(DigitSpec::parse("16p"), DigitSpec::new(16, true));
        assert_eq!(DigitSpec::parse("9"), DigitSpec::new(9, false));
    }

    #[test]
    fn test_parse_malformed_digit_spec() {
        assert_eq!(DigitSpec::parse("x"), DigitSpec::DEFAULT);
        assert_eq!(DigitSpec::parse("xp"), DigitSpec::DEFAULT);
        assert_eq!(DigitSpec::parse(""), DigitSpec::DEFAULT);
        assert_eq!(DigitSpec::parse("-7"), DigitSpec::DEFAULT);
    }

    #[test]
    fn test_layer_count() {
        assert_eq!(DigitSpec::new(7, false).layer_count(), 7);
        assert_eq!(DigitSpec::new(16, true).layer_count(), 17);
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("[T]Light"), Prefix::Toggle("Light"));
        assert_eq!(parse_prefix("[N]Speed"), Prefix::Number("Speed"));
        assert_eq!(parse_prefix("[S]Message"), Prefix::String("Message"));
        assert_eq!(parse_prefix("[R]Battery"), Prefix::Range("Battery"));
        assert_eq!(
            parse_prefix("[D:16p]char1"),
            Prefix::Digit(DigitSpec::new(16, true), "char1")
        );
        assert_eq!(parse_prefix("Background"), Prefix::Plain("Background"));
    }

    #[test]
    fn test_parse_unknown_brackets() {
        assert_eq!(parse_prefix("[X]thing"), Prefix::Plain("[X]thing"));
        assert_eq!(parse_prefix("[D:7 broken"), Prefix::Plain("[D:7 broken"));
        assert_eq!(parse_prefix("[t]lower"), Prefix::Plain("[t]lower"));
    }

    #[test]
    fn test_prefix_label() {
        assert_eq!(parse_prefix("[T] Status Light ").label(), "Status Light");
        assert_eq!(parse_prefix("[D:7]").label(), "");
        assert_eq!(parse_prefix("Plain").label(), "Plain");
    }

    #[test]
    fn test_is_pruned() {
        assert!(is_pruned("#Hidden"));
        assert!(is_pruned("#"));
        assert!(!is_pruned("Visible#"));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Background"), "Background");
        assert_eq!(sanitize("Layer 1"), "Layer_1");
        assert_eq!(sanitize("Special@Char#"), "Special_Char_");
        assert_eq!(sanitize("  padded  "), "padded");
        assert_eq!(sanitize("[X]thing"), "_X_thing");
    }
}
