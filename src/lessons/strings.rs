//! Lesson 3: string methods.
//!
//! Every index here counts characters, not bytes, so `"héllo"` has five
//! positions just like `"hello"`.

use itertools::Itertools;
use std::fmt::Display;

use crate::report::Report;
use crate::value::normalize_index;

// =============================================================================
// Checks
// =============================================================================

pub fn is_empty(s: &str) -> bool {
    s.is_empty()
}

pub fn contains_substring(s: &str, substring: &str) -> bool {
    s.contains(substring)
}

pub fn starts_with(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

pub fn ends_with(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

/// At least one cased character and no lowercase ones.
pub fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// At least one cased character and no uppercase ones.
pub fn is_lower(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

pub fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

/// ASCII digits only; the empty string is not a number.
pub fn is_digit(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_alnum(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

pub fn substring_exists(s: &str, sub: &str) -> bool {
    s.contains(sub)
}

// =============================================================================
// Transformations
// =============================================================================

pub fn strip_spaces(s: &str) -> &str {
    s.trim()
}

pub fn trim_string(s: &str) -> &str {
    s.trim()
}

pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn replace_substring(s: &str, old: &str, new: &str) -> String {
    s.replace(old, new)
}

/// An empty delimiter leaves the string whole.
pub fn split_string(s: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![s.to_string()];
    }
    s.split(delimiter).map(str::to_string).collect()
}

pub fn join_strings<I>(strings: I, delimiter: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    strings.into_iter().join(delimiter)
}

pub fn concat_strings(parts: &[&str]) -> String {
    parts.concat()
}

// =============================================================================
// Indexing and slicing
// =============================================================================

/// Character at `index`; negative indexes count from the end.
pub fn char_by_index(s: &str, index: isize) -> Option<char> {
    let len = s.chars().count();
    normalize_index(index, len).and_then(|i| s.chars().nth(i))
}

pub fn char_to_ascii(c: char) -> u32 {
    c as u32
}

pub fn ascii_to_char(code: u32) -> Option<char> {
    char::from_u32(code)
}

/// Character position of the first occurrence of `sub`.
pub fn index_of_substring(s: &str, sub: &str) -> Option<usize> {
    s.find(sub).map(|byte| s[..byte].chars().count())
}

/// `s[start:end:step]`.
///
/// Missing bounds default to the whole string in the direction of `step`,
/// negative bounds count from the end, and out-of-range bounds are clamped.
/// A zero step has no meaning and gives `None`.
pub fn slice_string(
    s: &str,
    start: Option<isize>,
    end: Option<isize>,
    step: Option<isize>,
) -> Option<String> {
    let step = step.unwrap_or(1);
    if step == 0 {
        return None;
    }
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as isize;
    let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };

    let clamp = |bound: isize| -> isize {
        if bound < 0 {
            (bound + len).max(lower)
        } else {
            bound.min(upper)
        }
    };
    let start = start.map_or(if step > 0 { lower } else { upper }, clamp);
    let end = end.map_or(if step > 0 { upper } else { lower }, clamp);

    let mut out = String::new();
    let mut i = start;
    while (step > 0 && i < end) || (step < 0 && i > end) {
        out.push(chars[i as usize]);
        i += step;
    }
    Some(out)
}

/// Characters from `start` up to, not including, `end`.
pub fn extract_substring(s: &str, start: isize, end: isize) -> String {
    slice_string(s, Some(start), Some(end), None).unwrap_or_default()
}

pub fn walkthrough(report: &mut Report) {
    report.section("String methods");

    let s = "Hello World";
    report.check("contains 'World' but not 'world'", contains_substring(s, "World") && !contains_substring(s, "world"));
    report.check("starts with 'Hello', ends with 'World'", starts_with(s, "Hello") && ends_with(s, "World"));
    report.check("'HELLO' is upper, 'Hello' is not", is_upper("HELLO") && !is_upper("Hello"));
    report.check("'Hello123' is alnum, 'Hello 123' is not", is_alnum("Hello123") && !is_alnum("Hello 123"));
    report.check("strip '  hello  '", strip_spaces("  hello  ") == "hello");
    report.check("replace World with Rust", replace_substring(s, "World", "Rust") == "Hello Rust");

    let parts = split_string("a,b,c", ",");
    report.show("split", format!("{:?}", parts));
    report.check("split then join with '-'", join_strings(&parts, "-") == "a-b-c");

    report.check("char_by_index(-1) = 's'", char_by_index("Ferris", -1) == Some('s'));
    report.check("char_by_index(6) is out of range", char_by_index("Ferris", 6).is_none());
    report.check("'A' <-> 65", char_to_ascii('A') == 65 && ascii_to_char(65) == Some('A'));
    report.check("index of 'World' is 6", index_of_substring(s, "World") == Some(6));

    let stepped = slice_string("Ferris", Some(0), Some(6), Some(2));
    report.show("Ferris[0:6:2]", stepped.as_deref().unwrap_or("-"));
    report.check("Ferris[0:6:2] = 'Fri'", stepped.as_deref() == Some("Fri"));
    report.check("Ferris[::-1] = 'sirreF'", slice_string("Ferris", None, None, Some(-1)).as_deref() == Some("sirreF"));
    report.note("Slicing never fails on out-of-range bounds; it clamps.");
}
