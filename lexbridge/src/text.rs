//! Matched-text extraction and escaping.
//!
//! Scanners report a match as a pair of byte offsets `ts..te` into the
//! input. [`token_text`] and [`token_text_trimmed`] turn those into owned
//! strings. [`escape_str`] renders text with whitespace and control
//! characters made visible, for log output.

use smartstring::alias::String;

/// Escaped representation of a single character.
///
/// Line feed, carriage return, form feed, vertical tab, tab and backslash
/// are rendered as two-character escapes; everything else is unchanged.
///
/// ```rust
/// # use lexbridge::text::escape_char;
/// assert_eq!(escape_char('\n').as_str(), "\\n");
/// assert_eq!(escape_char('x').as_str(), "x");
/// ```
pub fn escape_char(c: char) -> String {
    let mut s = String::new();
    push_escaped(&mut s, c);
    s
}

/// Copy of `s` with whitespace control characters and backslashes escaped.
///
/// ```rust
/// # use lexbridge::text::escape_str;
/// assert_eq!(escape_str("Median\nNarrative").as_str(), "Median\\nNarrative");
/// ```
pub fn escape_str(s: &str) -> String {
    let mut es = String::new();
    for c in s.chars() {
        push_escaped(&mut es, c);
    }
    es
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{0c}' => out.push_str("\\f"),
        '\u{0b}' => out.push_str("\\v"),
        '\t' => out.push_str("\\t"),
        '\\' => out.push_str("\\\\"),
        c => out.push(c),
    }
}

/// Text between byte offsets `ts` (inclusive) and `te` (exclusive).
///
/// # Panics
///
/// Panics if `ts > te`, if `te` is past the end of `input`, or if either
/// offset is not on a `char` boundary. These indicate a broken scanner, not
/// bad input.
pub fn token_text(input: &str, ts: usize, te: usize) -> String {
    assert!(ts <= te, "inverted match boundaries {ts}..{te}");
    assert!(te <= input.len(), "match end {te} past input length {}", input.len());
    String::from(&input[ts..te])
}

/// Text between `ts + ltrim` and `te - rtrim`.
///
/// The trimmed characters are typically delimiters (quote marks, comment
/// markers) that the scanner consumed but the grammar must not see.
///
/// # Panics
///
/// Panics if the trimmed range is inverted or out of bounds. An empty
/// trimmed range is allowed here; [`Bridge::deliver`](crate::Bridge::deliver)
/// imposes the stricter non-empty rule.
pub fn token_text_trimmed(input: &str, ts: usize, te: usize, ltrim: usize, rtrim: usize) -> String {
    assert!(ts <= te, "inverted match boundaries {ts}..{te}");
    assert!(
        ltrim + rtrim <= te - ts,
        "trim {ltrim}+{rtrim} exceeds match length {}",
        te - ts
    );
    token_text(input, ts + ltrim, te - rtrim)
}
