//! CPF extraction and normalization.
//!
//! A CPF is the customer's national identifier: 11 digits once stripped of
//! punctuation. These are pure functions; extraction failure is signalled
//! by an empty string so callers can re-prompt without an error path.

use once_cell::sync::Lazy;
use regex::Regex;

static CPF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{11}").expect("valid CPF regex"));

/// Strips everything but digits from a raw CPF.
///
/// `"123.456.789-01"` becomes `"12345678901"`.
pub fn normalize_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Finds an 11-digit CPF anywhere in free text.
///
/// All digits in the text are concatenated first, so masked forms
/// ("123.456.789-01") and CPFs split across words are both found.
/// Returns an empty string when no 11-digit run exists.
pub fn extract_cpf(text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    CPF_RE
        .find(&digits)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_mask() {
        assert_eq!(normalize_cpf("123.456.789-01"), "12345678901");
    }

    #[test]
    fn normalize_empty_input_gives_empty() {
        assert_eq!(normalize_cpf(""), "");
    }

    #[test]
    fn extract_finds_bare_cpf() {
        assert_eq!(extract_cpf("meu cpf é 12345678901"), "12345678901");
    }

    #[test]
    fn extract_finds_masked_cpf() {
        assert_eq!(extract_cpf("cpf: 123.456.789-01, por favor"), "12345678901");
    }

    #[test]
    fn extract_returns_empty_for_short_runs() {
        assert_eq!(extract_cpf("só tenho 12345 aqui"), "");
    }

    #[test]
    fn extract_takes_first_eleven_digits_of_longer_run() {
        assert_eq!(extract_cpf("123456789012345"), "12345678901");
    }
}
