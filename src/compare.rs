//! Line comparison: field extraction, mode interpretation, fallback and
//! tie-breaking combined into one total order.

use crate::config::SortConfig;
use crate::field::extract_field;
use crate::key::{KeyInterpreter, ParsedKey};
use std::cmp::Ordering;

/// A line together with its extracted field and interpreted key.
///
/// Computing this once per line lets the sorter avoid re-extracting fields on
/// every comparison without changing any comparison outcome.
#[derive(Debug, Clone, Copy)]
pub struct SortKey<'a> {
    pub line: &'a [u8],
    pub field: &'a [u8],
    pub parsed: Option<ParsedKey<'a>>,
}

/// Compares lines under a fixed configuration
pub struct LineComparator<'c> {
    config: &'c SortConfig,
    interpreter: &'static dyn KeyInterpreter,
}

impl<'c> LineComparator<'c> {
    pub fn new(config: &'c SortConfig) -> Self {
        Self {
            config,
            interpreter: config.mode.interpreter(),
        }
    }

    /// Extract and interpret the key of a single line
    pub fn key<'a>(&self, line: &'a [u8]) -> SortKey<'a> {
        let field = extract_field(line, self.config);
        SortKey {
            line,
            field,
            parsed: self.interpreter.parse(field),
        }
    }

    /// Compare two raw lines, reverse flag included
    #[inline]
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        self.compare_keys(&self.key(a), &self.key(b))
    }

    /// Compare two precomputed keys, reverse flag included
    #[inline]
    pub fn compare_keys(&self, a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
        let cmp = compare_ascending(a, b);
        if self.config.reverse {
            cmp.reverse()
        } else {
            cmp
        }
    }

    /// True when `a` may precede `b` in the requested order
    #[inline]
    pub fn in_order(&self, a: &[u8], b: &[u8]) -> bool {
        self.compare(a, b) != Ordering::Greater
    }
}

/// Ascending order before reversal.
///
/// Parsed keys precede unparsed ones; both-unparsed and equal parsed keys
/// fall back to the raw field bytes, and finally to the whole line.
fn compare_ascending(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    let by_key = match (&a.parsed, &b.parsed) {
        (Some(ka), Some(kb)) => ka.compare(kb),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_key
        .then_with(|| a.field.cmp(b.field))
        .then_with(|| a.line.cmp(b.line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldSplit, SortMode};

    fn cmp(config: &SortConfig, a: &str, b: &str) -> Ordering {
        LineComparator::new(config).compare(a.as_bytes(), b.as_bytes())
    }

    #[test]
    fn test_lexicographic_default() {
        let config = SortConfig::default();
        assert_eq!(cmp(&config, "a", "b"), Ordering::Less);
        assert_eq!(cmp(&config, "10", "9"), Ordering::Less);
        assert_eq!(cmp(&config, "same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_numeric_mode() {
        let config = SortConfig::default().with_mode(SortMode::Numeric);
        assert_eq!(cmp(&config, "9", "10"), Ordering::Less);
        assert_eq!(cmp(&config, "-1", "0.5"), Ordering::Less);
    }

    #[test]
    fn test_parsed_precedes_unparsed_in_both_directions() {
        let config = SortConfig::default().with_mode(SortMode::Numeric);
        assert_eq!(cmp(&config, "100", "abc"), Ordering::Less);
        assert_eq!(cmp(&config, "abc", "100"), Ordering::Greater);

        // Reversal flips the whole outcome, fallback rule included.
        let reversed = config.with_reverse(true);
        assert_eq!(cmp(&reversed, "100", "abc"), Ordering::Greater);
    }

    #[test]
    fn test_both_unparsed_fall_back_to_field_bytes() {
        let config = SortConfig::default().with_mode(SortMode::Month);
        assert_eq!(cmp(&config, "xyz", "abc"), Ordering::Greater);
        assert_eq!(cmp(&config, "Feb", "Jan"), Ordering::Greater);
    }

    #[test]
    fn test_equal_values_fall_back_to_field_then_line() {
        let config = SortConfig::default()
            .with_mode(SortMode::Numeric)
            .with_split(FieldSplit::Whitespace);
        // 1 == 1.0 numerically, so the raw field decides.
        assert_eq!(cmp(&config, "1.0 a", "1 z"), Ordering::Greater);
        // Identical fields: the whole line decides.
        assert_eq!(cmp(&config, "5 b", "5 a"), Ordering::Greater);
    }

    #[test]
    fn test_missing_field_compares_as_empty() {
        let config = SortConfig::default()
            .with_field(2)
            .with_split(FieldSplit::separator(","));
        assert_eq!(cmp(&config, "zzz", "a,b"), Ordering::Less);
        assert_eq!(cmp(&config, "b,", "a"), Ordering::Greater);
    }

    #[test]
    fn test_human_precedence_over_numeric() {
        let config = crate::config::SortConfigBuilder::new()
            .mode(SortMode::Numeric)
            .mode(SortMode::HumanNumeric)
            .build()
            .expect("Failed to build test config");
        assert_eq!(cmp(&config, "2K", "1500"), Ordering::Greater);
    }

    #[test]
    fn test_reverse_negates_result() {
        let config = SortConfig::default().with_reverse(true);
        assert_eq!(cmp(&config, "a", "b"), Ordering::Greater);
        assert_eq!(cmp(&config, "a", "a"), Ordering::Equal);
    }

    #[test]
    fn test_key_exposes_field_and_parse() {
        let config = SortConfig::default()
            .with_mode(SortMode::HumanNumeric)
            .with_split(FieldSplit::Whitespace)
            .with_field(2);
        let comparator = LineComparator::new(&config);
        let key = comparator.key(b"file 4K");
        assert_eq!(key.field, b"4K");
        assert_eq!(key.parsed, Some(ParsedKey::Quantity(4000.0)));
    }
}
