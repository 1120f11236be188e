//! Per-kind scanners for the built-in terminals.
//!
//! Every scanner starts at byte offset `at` (whitespace already skipped) and
//! either returns the matched [`Scan`] or `None`. Character classes are
//! ASCII, so every boundary a scanner stops on is a UTF-8 boundary.

use crate::capture::CaptureValue;
use crate::error::ParseError;
use crate::span::{Span, column_of};

/// Glob characters that mark an identifier as a wildcard pattern.
const WILDCARD_FLAGS: &[u8] = b"?*[";
/// Glob characters allowed after the first character of a wildcard.
const WILDCARD_CHARS: &[u8] = b"?*[!-]";

/// A successful scan.
pub(super) struct Scan {
    /// The captured region.
    pub(super) span: Span,
    /// Offset just past the consumed input.
    pub(super) end: usize,
    /// The decoded value.
    pub(super) value: CaptureValue,
}

impl Scan {
    const fn text(start: usize, end: usize) -> Self {
        Self {
            span: Span::between(start, end),
            end,
            value: CaptureValue::None,
        }
    }
}

/// The C `isspace` set: ASCII whitespace plus vertical tab.
const fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

const fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

const fn is_ident_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn byte_at(line: &str, pos: usize) -> Option<u8> {
    line.as_bytes().get(pos).copied()
}

/// Returns the first offset at or after `from` whose byte satisfies `stop`,
/// or the line length.
fn run_until(line: &str, from: usize, stop: impl Fn(u8) -> bool) -> usize {
    line.as_bytes()
        .get(from..)
        .and_then(|tail| tail.iter().position(|&b| stop(b)))
        .map_or(line.len(), |offset| from.saturating_add(offset))
}

pub(super) fn skip_space(line: &str, from: usize) -> usize {
    run_until(line, from, |b| !is_space(b))
}

pub(super) fn end_of_input(line: &str, at: usize) -> Option<Scan> {
    (at >= line.len()).then(|| Scan::text(at, at))
}

pub(super) fn quoted_string(line: &str, at: usize) -> Result<Option<Scan>, ParseError> {
    if byte_at(line, at) != Some(b'"') {
        return Ok(None);
    }
    let content = at.saturating_add(1);
    let mut pos = content;
    loop {
        match byte_at(line, pos) {
            None => {
                return Err(ParseError::UnterminatedString {
                    column: column_of(line, at),
                });
            }
            Some(b'"') if byte_at(line, pos.saturating_sub(1)) != Some(b'\\') => break,
            Some(_) => pos = pos.saturating_add(1),
        }
    }
    Ok(Some(Scan {
        span: Span::between(content, pos),
        end: pos.saturating_add(1),
        value: CaptureValue::None,
    }))
}

pub(super) fn identifier(line: &str, at: usize) -> Option<Scan> {
    let first = byte_at(line, at)?;
    if !is_ident_start(first) {
        return None;
    }
    let end = run_until(line, at.saturating_add(1), |b| !is_ident_char(b));
    Some(Scan::text(at, end))
}

pub(super) fn identifier_with_wildcard(line: &str, at: usize) -> Option<Scan> {
    let first = byte_at(line, at)?;
    if !is_ident_start(first) && !WILDCARD_FLAGS.contains(&first) {
        return None;
    }
    let end = run_until(line, at.saturating_add(1), |b| {
        !is_ident_char(b) && !WILDCARD_CHARS.contains(&b)
    });
    let flagged = line
        .as_bytes()
        .get(at..end)
        .is_some_and(|token| token.iter().any(|b| WILDCARD_FLAGS.contains(b)));
    flagged.then(|| Scan::text(at, end))
}

pub(super) fn integer(line: &str, at: usize) -> Result<Option<Scan>, ParseError> {
    let end = run_until(line, at, |b| !b.is_ascii_digit());
    if end == at {
        return Ok(None);
    }
    let digits = line.as_bytes().get(at..end).unwrap_or_default();
    let value = digits.iter().try_fold(0_i64, |acc, &digit| {
        acc.checked_mul(10)
            .and_then(|scaled| scaled.checked_add(i64::from(digit - b'0')))
    });
    let Some(parsed) = value else {
        return Err(ParseError::IntegerOverflow {
            column: column_of(line, at),
        });
    };
    Ok(Some(Scan {
        span: Span::between(at, end),
        end,
        value: CaptureValue::Integer(parsed),
    }))
}

pub(super) fn word(line: &str, at: usize) -> Option<Scan> {
    let end = run_until(line, at, is_space);
    (end > at).then(|| Scan::text(at, end))
}

/// Matches `text` verbatim, rejecting a match that would split a run of
/// letters or a run of digits.
pub(super) fn literal(line: &str, at: usize, text: &str) -> Option<Scan> {
    let rest = line.get(at..)?;
    if !rest.starts_with(text) {
        return None;
    }
    let end = at.saturating_add(text.len());
    if let (Some(last), Some(next)) = (text.bytes().last(), byte_at(line, end)) {
        let splits_word = last.is_ascii_alphabetic() && next.is_ascii_alphabetic();
        let splits_number = last.is_ascii_digit() && next.is_ascii_digit();
        if splits_word || splits_number {
            return None;
        }
    }
    Some(Scan::text(at, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_space_stops_at_first_non_space() {
        assert_eq!(skip_space(" \t\u{b}x", 0), 3);
        assert_eq!(skip_space("abc", 1), 1);
        assert_eq!(skip_space("   ", 0), 3);
        assert_eq!(skip_space("", 0), 0);
    }

    #[test]
    fn quoted_string_skips_escaped_quotes() {
        let line = r#""a\"b" rest"#;
        let scan = quoted_string(line, 0).expect("scan").expect("match");
        assert_eq!(line.get(scan.span.range()), Some(r#"a\"b"#));
        assert_eq!(scan.end, 6);
    }

    #[test]
    fn empty_quoted_string_matches() {
        let scan = quoted_string("\"\"", 0).expect("scan").expect("match");
        assert!(scan.span.is_empty());
        assert_eq!(scan.end, 2);
    }

    #[test]
    fn integer_accepts_max_value() {
        let scan = integer("9223372036854775807", 0)
            .expect("scan")
            .expect("match");
        assert!(matches!(scan.value, CaptureValue::Integer(i64::MAX)));
    }

    #[test]
    fn wildcard_may_start_with_flag() {
        let scan = identifier_with_wildcard("*", 0).expect("match");
        assert_eq!(scan.end, 1);
    }

    #[test]
    fn literal_rejects_digit_run_after_match() {
        assert!(literal("123", 0, "12").is_none());
        assert!(literal("12+", 0, "12").is_some());
    }
}
