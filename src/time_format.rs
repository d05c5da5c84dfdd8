//! Date-pattern translation and timestamp rendering.
//!
//! Option patterns use `dateformat`-style tokens (`yyyy-mm-dd`,
//! `yyyy-mm-dd hh:MM:ss`). They are translated to chrono's strftime syntax
//! and rendered in local time. An unresolved timestamp renders as the fixed
//! placeholder instead of failing, so degraded entries still get a row.

use chrono::{Local, TimeZone};

/// Placeholder rendered when an entry has no resolvable timestamp.
pub const INVALID_DATE: &str = "Invalid Date";

// Longest tokens first so "yyyy" wins over "yy" and "MM" over "mm" ordering
// ambiguities never arise.
const TOKENS: &[(&str, &str)] = &[
    ("yyyy", "%Y"),
    ("yy", "%y"),
    ("mm", "%m"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("MM", "%M"),
    ("ss", "%S"),
];

/// Translates a dateformat-style pattern into a chrono strftime pattern.
/// Characters outside the token table pass through as literals.
pub fn to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        for (token, replacement) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    out
}

/// Renders an epoch-millisecond timestamp in local time with the given
/// dateformat-style pattern, or [`INVALID_DATE`] when the timestamp is
/// absent or unrepresentable.
pub fn format_timestamp(timestamp_ms: Option<i64>, pattern: &str) -> String {
    let Some(ms) = timestamp_ms else {
        return INVALID_DATE.to_string();
    };

    match Local.timestamp_millis_opt(ms).earliest() {
        Some(datetime) => datetime.format(&to_strftime(pattern)).to_string(),
        None => INVALID_DATE.to_string(),
    }
}
