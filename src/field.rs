//! Field extraction: locating the sort key inside a line.

use crate::config::{FieldSplit, SortConfig};
use memchr::memmem;

/// Return the configured 1-based field of `line`, or an empty slice when the
/// line has fewer fields.
pub fn extract_field<'a>(line: &'a [u8], config: &SortConfig) -> &'a [u8] {
    let line = if config.trim_trailing {
        trim_trailing_blanks(line)
    } else {
        line
    };

    let index = config.field.saturating_sub(1);
    let field = match &config.split {
        FieldSplit::Whitespace => nth_word(line, index),
        FieldSplit::Separator(sep) => nth_separated(line, sep, index),
    };
    field.unwrap_or_default()
}

/// Strip trailing spaces and tabs.
pub fn trim_trailing_blanks(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b' ' | b'\t'] = line {
        line = rest;
    }
    line
}

#[inline]
fn is_blank(b: u8) -> bool {
    // ASCII whitespace plus vertical tab
    b.is_ascii_whitespace() || b == 0x0b
}

/// Words are separated by Unicode whitespace (NBSP, EM SPACE, ...) when the
/// line is valid UTF-8, and by ASCII blanks otherwise.
fn nth_word(line: &[u8], index: usize) -> Option<&[u8]> {
    match std::str::from_utf8(line) {
        Ok(text) => text.split_whitespace().nth(index).map(str::as_bytes),
        Err(_) => line
            .split(|&b| is_blank(b))
            .filter(|word| !word.is_empty())
            .nth(index),
    }
}

fn nth_separated<'a>(line: &'a [u8], sep: &[u8], index: usize) -> Option<&'a [u8]> {
    if sep.is_empty() {
        return nth_word(line, index);
    }

    let mut start = 0;
    let mut field = 0;
    for pos in memmem::find_iter(line, sep) {
        if field == index {
            return Some(&line[start..pos]);
        }
        field += 1;
        start = pos + sep.len();
    }
    (field == index).then(|| &line[start..])
}
