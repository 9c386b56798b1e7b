//! Route number normalization.

use std::fmt;

use serde::Serialize;

/// A normalized route number.
///
/// Route numbers arrive from several tables that disagree on zero-padding,
/// separator placement and prefix spacing. Every table is keyed by the
/// normalized form, so two raw identifiers for the same route always compare
/// equal once wrapped in a `RouteNo`.
///
/// # Examples
///
/// ```
/// use fare_server::domain::RouteNo;
///
/// assert_eq!(RouteNo::normalize("007").as_str(), "7");
/// assert_eq!(RouteNo::normalize("01-A"), RouteNo::normalize("1-A"));
/// assert_eq!(RouteNo::normalize("002/015A").as_str(), "2/15A");
///
/// // Highway numbers carry an alphabetic prefix
/// assert_eq!(RouteNo::normalize_highway("EX 007").as_str(), "EX 7");
/// assert_eq!(RouteNo::normalize_highway("EX7"), RouteNo::normalize_highway("EX 007"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct RouteNo(String);

impl RouteNo {
    /// Normalize a regular (stage-fare network) route number.
    ///
    /// The input is split on `-` and `/`, keeping the separators. Each
    /// remaining segment that starts with a digit loses its leading zeros
    /// (a lone `0` is kept); trailing letters are preserved, so `"007A"`
    /// becomes `"7A"`. Blank input yields an empty route number.
    pub fn normalize(raw: &str) -> Self {
        RouteNo(normalize_segments(raw.trim()))
    }

    /// Normalize a highway route number.
    ///
    /// A leading run of letters and spaces is split off as the prefix,
    /// trimmed, and re-attached with exactly one space before the
    /// normalized remainder. A separator directly after the prefix is
    /// dropped, so `"EX-01/3"`, `"EX 1/3"` and `"EX01/3"` all become
    /// `"EX 1/3"`.
    pub fn normalize_highway(raw: &str) -> Self {
        let raw = raw.trim();
        let split = raw
            .find(|c: char| !(c.is_ascii_alphabetic() || c.is_whitespace()))
            .unwrap_or(raw.len());
        let (prefix, rest) = raw.split_at(split);

        let prefix = prefix.split_whitespace().collect::<Vec<_>>().join(" ");
        let rest = rest
            .strip_prefix(is_separator)
            .unwrap_or(rest);
        let rest = normalize_segments(rest);

        match (prefix.is_empty(), rest.is_empty()) {
            (true, _) => RouteNo(rest),
            (false, true) => RouteNo(prefix),
            (false, false) => RouteNo(format!("{prefix} {rest}")),
        }
    }

    /// Returns the normalized route number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '/'
}

/// Strip zero-padding from every separator-delimited segment.
fn normalize_segments(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut segment_start = 0;

    for (i, c) in s.char_indices() {
        if is_separator(c) {
            out.push_str(strip_leading_zeros(&s[segment_start..i]));
            out.push(c);
            segment_start = i + c.len_utf8();
        }
    }
    out.push_str(strip_leading_zeros(&s[segment_start..]));
    out
}

/// Drop leading zeros from a segment's leading digit run, keeping at least
/// one digit. Segments that don't start with a digit are returned unchanged.
fn strip_leading_zeros(segment: &str) -> &str {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return segment;
    }
    let zeros = segment.bytes().take_while(|&b| b == b'0').count();
    &segment[zeros.min(digits - 1)..]
}

impl fmt::Debug for RouteNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteNo({})", self.0)
    }
}

impl fmt::Display for RouteNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_zero_padding() {
        assert_eq!(RouteNo::normalize("007").as_str(), "7");
        assert_eq!(RouteNo::normalize("7").as_str(), "7");
        assert_eq!(RouteNo::normalize("0100").as_str(), "100");
    }

    #[test]
    fn keeps_a_single_zero() {
        assert_eq!(RouteNo::normalize("0").as_str(), "0");
        assert_eq!(RouteNo::normalize("000").as_str(), "0");
        assert_eq!(RouteNo::normalize("00A").as_str(), "0A");
    }

    #[test]
    fn preserves_alphabetic_suffix() {
        assert_eq!(RouteNo::normalize("007A").as_str(), "7A");
        assert_eq!(RouteNo::normalize("01-A"), RouteNo::normalize("1-A"));
        assert_eq!(RouteNo::normalize("01-A").as_str(), "1-A");
    }

    #[test]
    fn normalizes_every_segment() {
        assert_eq!(RouteNo::normalize("002-015/03").as_str(), "2-15/3");
        assert_eq!(RouteNo::normalize("87/002-1").as_str(), "87/2-1");
    }

    #[test]
    fn leaves_non_numeric_segments_alone() {
        assert_eq!(RouteNo::normalize("EX 01").as_str(), "EX 01");
        assert_eq!(RouteNo::normalize("A-007").as_str(), "A-7");
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(RouteNo::normalize("").is_empty());
        assert!(RouteNo::normalize("   ").is_empty());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(RouteNo::normalize("  04 ").as_str(), "4");
    }

    #[test]
    fn highway_prefix_spacing() {
        assert_eq!(RouteNo::normalize_highway("EX 007").as_str(), "EX 7");
        assert_eq!(RouteNo::normalize_highway("EX7").as_str(), "EX 7");
        assert_eq!(RouteNo::normalize_highway("EX   7").as_str(), "EX 7");
    }

    #[test]
    fn highway_drops_separator_after_prefix() {
        assert_eq!(RouteNo::normalize_highway("EX-01/3").as_str(), "EX 1/3");
        assert_eq!(RouteNo::normalize_highway("EX/01").as_str(), "EX 1");
    }

    #[test]
    fn highway_without_prefix() {
        assert_eq!(RouteNo::normalize_highway("007").as_str(), "7");
        assert_eq!(RouteNo::normalize_highway("01-02").as_str(), "1-2");
    }

    #[test]
    fn highway_prefix_only() {
        assert_eq!(RouteNo::normalize_highway("EX").as_str(), "EX");
        assert!(RouteNo::normalize_highway("").is_empty());
    }

    #[test]
    fn display_and_debug() {
        let route = RouteNo::normalize("08");
        assert_eq!(format!("{}", route), "8");
        assert_eq!(format!("{:?}", route), "RouteNo(8)");
    }
}
