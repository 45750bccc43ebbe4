//! Date extraction and normalization.
//!
//! Canonical form is ISO `YYYY-MM-DD`. An empty string signals that no
//! date could be extracted or parsed, mirroring the CPF helpers.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Formats accepted verbatim, tried in order.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];

/// Patterns scanned for inside free text before falling back to parsing
/// the whole string.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d{2}/\d{2}/\d{4}",
        r"\d{4}-\d{2}-\d{2}",
        r"\d{2}-\d{2}-\d{4}",
        r"\d{2}/\d{2}/\d{2,4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid date pattern"))
    .collect()
});

static LOOSE_DMY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2})\D+(\d{2})\D+(\d{4})").expect("valid loose date regex"));

/// Normalizes a date string to `YYYY-MM-DD`.
///
/// Accepts `DD/MM/YYYY`, `YYYY-MM-DD`, `DD-MM-YYYY` and `YYYY/MM/DD`.
/// As a last resort, looks for a `dd <sep> mm <sep> yyyy` shape anywhere
/// in the string. Returns an empty string when nothing parses, including
/// calendar-invalid dates like `31/02/2000`.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            // Two-digit years are ambiguous; require four.
            if date.year() >= 1000 {
                return date.format("%Y-%m-%d").to_string();
            }
        }
    }

    if let Some(caps) = LOOSE_DMY_RE.captures(s) {
        let (d, m, y) = (&caps[1], &caps[2], &caps[3]);
        let parsed = (
            y.parse::<i32>(),
            m.parse::<u32>(),
            d.parse::<u32>(),
        );
        if let (Ok(y), Ok(m), Ok(d)) = parsed {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                return date.format("%Y-%m-%d").to_string();
            }
        }
    }

    String::new()
}

/// Locates a date inside free text and returns it normalized.
///
/// Scans for explicit patterns first; when none match, the whole text is
/// handed to [`normalize_date`] as a fallback. Empty string on failure.
pub fn extract_date(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    for pattern in DATE_PATTERNS.iter() {
        if let Some(m) = pattern.find(text) {
            return normalize_date(m.as_str());
        }
    }
    normalize_date(text)
}
