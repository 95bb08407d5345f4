//! Key interpreters for the supported comparison modes.
//!
//! Each interpreter turns a field value into a [`ParsedKey`] or reports that
//! the field does not parse under its mode. Interpreters never allocate and
//! never fail loudly: an unparseable field is handled by the comparator.

use std::cmp::Ordering;

/// An ordered value produced by a key interpreter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedKey<'a> {
    /// Raw field bytes, ordered bytewise
    Text(&'a [u8]),
    /// Numeric or human-size quantity; never NaN
    Quantity(f64),
    /// Month number, 1 for January through 12 for December
    Month(u8),
}

impl ParsedKey<'_> {
    /// Compare two keys produced by the same interpreter.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ParsedKey::Text(a), ParsedKey::Text(b)) => a.cmp(b),
            (ParsedKey::Quantity(a), ParsedKey::Quantity(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (ParsedKey::Month(a), ParsedKey::Month(b)) => a.cmp(b),
            // A run uses a single interpreter, so mixed kinds never meet.
            _ => Ordering::Equal,
        }
    }
}

/// A comparison mode's parsing strategy
pub trait KeyInterpreter: Sync {
    /// Parse a field value, or `None` when it does not fit this mode
    fn parse<'a>(&self, field: &'a [u8]) -> Option<ParsedKey<'a>>;
}

/// Plain byte order; accepts every field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicographic;

/// Signed decimal floating-point numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

/// Numbers with an optional SI (`K`, `MB`) or IEC (`Ki`, `GiB`) suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanSize;

/// Three-letter English month abbreviations.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthName;

pub static LEXICOGRAPHIC: Lexicographic = Lexicographic;
pub static NUMERIC: Numeric = Numeric;
pub static HUMAN_SIZE: HumanSize = HumanSize;
pub static MONTH: MonthName = MonthName;

impl KeyInterpreter for Lexicographic {
    fn parse<'a>(&self, field: &'a [u8]) -> Option<ParsedKey<'a>> {
        Some(ParsedKey::Text(field))
    }
}

impl KeyInterpreter for Numeric {
    fn parse<'a>(&self, field: &'a [u8]) -> Option<ParsedKey<'a>> {
        parse_numeric(field).map(ParsedKey::Quantity)
    }
}

impl KeyInterpreter for HumanSize {
    fn parse<'a>(&self, field: &'a [u8]) -> Option<ParsedKey<'a>> {
        parse_human_size(field).map(ParsedKey::Quantity)
    }
}

impl KeyInterpreter for MonthName {
    fn parse<'a>(&self, field: &'a [u8]) -> Option<ParsedKey<'a>> {
        parse_month(field).map(ParsedKey::Month)
    }
}

/// Parse a whole field as a float, tolerating surrounding whitespace.
pub fn parse_numeric(field: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(field).ok()?;
    text.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Magnitude letters; position + 1 is the power of 1000 (or 1024).
const MAGNITUDES: [u8; 8] = *b"KMGTPEZY";

/// Parse `<number><unit>` where number is `[+-]?digits(.digits)?` and the
/// unit is an optional magnitude letter, an optional `i` and an optional `B`.
pub fn parse_human_size(field: &[u8]) -> Option<f64> {
    let s = trim_ascii_whitespace(field);
    let number_len = scan_decimal(s)?;
    let (number, unit) = s.split_at(number_len);

    // The scanned prefix is pure ASCII.
    let value: f64 = std::str::from_utf8(number).ok()?.parse().ok()?;
    Some(value * unit_multiplier(unit)?)
}

fn trim_ascii_whitespace(s: &[u8]) -> &[u8] {
    let start = s
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(s.len());
    let end = s
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |pos| pos + 1);
    &s[start..end]
}

/// Length of the leading `[+-]?digits(.digits)?` run, if there is one.
fn scan_decimal(s: &[u8]) -> Option<usize> {
    let mut i = 0;
    if matches!(s.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < s.len() && s[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return None;
    }

    if s.get(i) == Some(&b'.') && s.get(i + 1).is_some_and(u8::is_ascii_digit) {
        i += 1;
        while i < s.len() && s[i].is_ascii_digit() {
            i += 1;
        }
    }

    Some(i)
}

fn unit_multiplier(unit: &[u8]) -> Option<f64> {
    let mut rest = unit;

    let mut power = 0;
    if let Some(pos) = rest
        .first()
        .and_then(|c| MAGNITUDES.iter().position(|m| *m == c.to_ascii_uppercase()))
    {
        power = pos as i32 + 1;
        rest = &rest[1..];
    }

    let binary = matches!(rest.first(), Some(b'i' | b'I'));
    if binary {
        rest = &rest[1..];
    }
    if matches!(rest.first(), Some(b'b' | b'B')) {
        rest = &rest[1..];
    }
    if !rest.is_empty() {
        return None;
    }

    let base: f64 = if binary { 1024.0 } else { 1000.0 };
    Some(base.powi(power))
}

static MONTHS: [&[u8; 3]; 12] = [
    b"jan", b"feb", b"mar", b"apr", b"may", b"jun", b"jul", b"aug", b"sep", b"oct", b"nov",
    b"dec",
];

/// Month number (1..=12) of the field's first three bytes, case-insensitive.
pub fn parse_month(field: &[u8]) -> Option<u8> {
    let prefix = field.get(..3)?;
    MONTHS
        .iter()
        .position(|month| prefix.eq_ignore_ascii_case(&month[..]))
        .map(|idx| idx as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_parsing() {
        assert_eq!(parse_numeric(b"42"), Some(42.0));
        assert_eq!(parse_numeric(b"  -3.5 "), Some(-3.5));
        assert_eq!(parse_numeric(b"+7"), Some(7.0));
        assert_eq!(parse_numeric(b"1e3"), Some(1000.0));
        assert_eq!(parse_numeric(b""), None);
        assert_eq!(parse_numeric(b"12abc"), None);
        assert_eq!(parse_numeric(b"abc"), None);
        assert_eq!(parse_numeric(b"NaN"), None);
    }

    #[test]
    fn test_human_size_si_units() {
        assert_eq!(parse_human_size(b"100"), Some(100.0));
        assert_eq!(parse_human_size(b"1K"), Some(1e3));
        assert_eq!(parse_human_size(b"2m"), Some(2e6));
        assert_eq!(parse_human_size(b"1.5G"), Some(1.5e9));
        assert_eq!(parse_human_size(b"3KB"), Some(3e3));
        assert_eq!(parse_human_size(b"3kb"), Some(3e3));
        assert_eq!(parse_human_size(b"-2T"), Some(-2e12));
        let yotta = parse_human_size(b" 4Y ").expect("4Y should parse");
        assert!((yotta / 4e24 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_human_size_iec_units() {
        assert_eq!(parse_human_size(b"1KiB"), Some(1024.0));
        assert_eq!(parse_human_size(b"1Ki"), Some(1024.0));
        assert_eq!(parse_human_size(b"2MiB"), Some(2.0 * 1024.0 * 1024.0));
        assert_eq!(parse_human_size(b"1gib"), Some(1024f64.powi(3)));
    }

    #[test]
    fn test_human_size_rejects_garbage() {
        assert_eq!(parse_human_size(b""), None);
        assert_eq!(parse_human_size(b"K"), None);
        assert_eq!(parse_human_size(b"1X"), None);
        assert_eq!(parse_human_size(b"1KBs"), None);
        assert_eq!(parse_human_size(b"5."), None);
        assert_eq!(parse_human_size(b".5K"), None);
        assert_eq!(parse_human_size(b"1e3"), None);
        assert_eq!(parse_human_size(b"1 K"), None);
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!(parse_month(b"jan"), Some(1));
        assert_eq!(parse_month(b"FEB"), Some(2));
        assert_eq!(parse_month(b"December"), Some(12));
        assert_eq!(parse_month(b"ja"), None);
        assert_eq!(parse_month(b""), None);
        assert_eq!(parse_month(b"foo"), None);
        assert_eq!(parse_month(b" jan"), None);
    }

    #[test]
    fn test_interpreters_wrap_parsers() {
        assert_eq!(LEXICOGRAPHIC.parse(b"xyz"), Some(ParsedKey::Text(b"xyz")));
        assert_eq!(NUMERIC.parse(b"9"), Some(ParsedKey::Quantity(9.0)));
        assert_eq!(HUMAN_SIZE.parse(b"1K"), Some(ParsedKey::Quantity(1000.0)));
        assert_eq!(MONTH.parse(b"Mar"), Some(ParsedKey::Month(3)));
        assert_eq!(MONTH.parse(b"xyz"), None);
    }

    #[test]
    fn test_parsed_key_ordering() {
        let small = ParsedKey::Quantity(2.0);
        let big = ParsedKey::Quantity(10.0);
        assert_eq!(small.compare(&big), Ordering::Less);
        assert_eq!(ParsedKey::Month(12).compare(&ParsedKey::Month(1)), Ordering::Greater);
        assert_eq!(
            ParsedKey::Text(b"10").compare(&ParsedKey::Text(b"9")),
            Ordering::Less
        );
    }
}
