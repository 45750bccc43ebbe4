//! Currency pair extraction for the exchange flow.
//!
//! Resolves both ISO codes ("USD BRL") and Portuguese currency names
//! ("dólar para euro"). A single currency is quoted against BRL; with no
//! recognizable currency at all, the pair defaults to USD/BRL.

use once_cell::sync::Lazy;
use regex::Regex;

static ISO_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([a-zA-Z]{3})\b").expect("valid iso code regex"));
static PAIR_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\wáéíóúãõâêôç$]+)\s*(?:para|to|->)\s*([\wáéíóúãõâêôç$]+)")
        .expect("valid pair phrase regex")
});

const NAME_TABLE: [(&str, &str); 10] = [
    ("dólar", "USD"),
    ("dolar", "USD"),
    ("euro", "EUR"),
    ("real", "BRL"),
    ("reais", "BRL"),
    ("libra", "GBP"),
    ("iene", "JPY"),
    ("yen", "JPY"),
    ("bitcoin", "BTC"),
    ("btc", "BTC"),
];

fn name_to_code(word: &str) -> Option<&'static str> {
    let w = word.to_lowercase();
    NAME_TABLE
        .iter()
        .find(|(name, _)| w.contains(name))
        .map(|(_, code)| *code)
}

/// Resolves a word into a code: known name first, otherwise the first
/// three letters upper-cased.
fn word_to_code(word: &str) -> String {
    if let Some(code) = name_to_code(word) {
        return code.to_string();
    }
    word.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// Extracts a `(base, target)` currency pair from the text.
///
/// Resolution order: two ISO codes, a single ISO code against BRL, a
/// "X para Y" phrase, any known currency name against BRL, and finally
/// the USD/BRL default.
pub fn parse_exchange_text(text: &str) -> (String, String) {
    // Any 3-letter word counts as a code; the provider rejects bad ones.
    let codes: Vec<String> = ISO_CODE_RE
        .captures_iter(text)
        .map(|c| c[1].to_uppercase())
        .collect();

    if codes.len() >= 2 {
        return (codes[0].clone(), codes[1].clone());
    }
    if codes.len() == 1 {
        return (codes[0].clone(), "BRL".to_string());
    }

    if let Some(caps) = PAIR_PHRASE_RE.captures(text) {
        let base = word_to_code(&caps[1]);
        let target = word_to_code(&caps[2]);
        if base.len() == 3 && target.len() == 3 {
            return (base, target);
        }
    }

    for word in text.split_whitespace() {
        if let Some(code) = name_to_code(word) {
            return (code.to_string(), "BRL".to_string());
        }
    }

    ("USD".to_string(), "BRL".to_string())
}
