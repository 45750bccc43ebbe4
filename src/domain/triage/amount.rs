//! Monetary amount extraction from free text.
//!
//! Accepts Brazilian formatting ("R$ 1.500,50"), bare numbers and the
//! shorthand suffixes "k"/"mil" (thousands) and "m" (millions).

use once_cell::sync::Lazy;
use regex::Regex;

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(k|mil|m)?").expect("valid amount regex"));
static BARE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));

/// Extracts a positive monetary amount from the text, or `None`.
///
/// Normalization: currency symbol and whitespace are stripped, "." is
/// treated as a thousands separator and removed, "," becomes the decimal
/// point. A trailing "k"/"mil" multiplies by 1 000 and "m" by 1 000 000.
pub fn extract_amount(text: &str) -> Option<f64> {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .replace("r$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let cleaned = cleaned.replace('.', "").replace(',', ".");

    if let Some(caps) = AMOUNT_RE.captures(&cleaned) {
        let number: f64 = caps.get(1)?.as_str().parse().ok()?;
        let multiplier = match caps.get(2).map(|m| m.as_str()) {
            Some("k") | Some("mil") => 1_000.0,
            Some("m") => 1_000_000.0,
            _ => 1.0,
        };
        let value = number * multiplier;
        if value > 0.0 {
            return Some(value);
        }
    }

    // Last resort: any bare number anywhere in the cleaned text.
    BARE_NUMBER_RE
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(extract_amount("8000"), Some(8000.0));
        assert_eq!(extract_amount("quero 5000 de limite"), Some(5000.0));
    }

    #[test]
    fn currency_symbol_and_brazilian_separators() {
        assert_eq!(extract_amount("R$ 5000"), Some(5000.0));
        assert_eq!(extract_amount("1.500,50"), Some(1500.50));
        assert_eq!(extract_amount("R$ 10.000"), Some(10000.0));
    }

    #[test]
    fn shorthand_suffixes() {
        assert_eq!(extract_amount("8k"), Some(8000.0));
        assert_eq!(extract_amount("2 mil"), Some(2000.0));
        assert_eq!(extract_amount("1m"), Some(1_000_000.0));
    }

    #[test]
    fn no_number_yields_none() {
        assert_eq!(extract_amount("não sei"), None);
        assert_eq!(extract_amount(""), None);
        assert_eq!(extract_amount("0"), None);
    }
}
