//! Free-text intent interpretation.
//!
//! Turns one user turn into a discrete intent: menu choices are matched
//! as exact numeric tokens first, then by keyword substrings. Yes/no and
//! other single-letter shortcuts are matched as whole tokens so they do
//! not fire inside ordinary words ("menu" is not a "n").

use once_cell::sync::Lazy;
use regex::Regex;

/// Main-menu choice after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceChoice {
    Credito,
    Interview,
    Cambio,
}

/// Credit sub-menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditAction {
    Consultar,
    Solicitar,
}

static SHORT_CHOICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\(\[]?\d{1,2}[\)\]]?$").expect("valid short-choice regex"));
static DIGIT_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d[\.\-\s]*$").expect("valid digit-punct regex"));

static EXCHANGE_TOPIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(cotar|cotação|cotacao|moeda)\b").expect("valid topic regex"));
static CREDIT_TOPIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(limite|crédito|credito|aumento)\b").expect("valid topic regex"));

const EXIT_KEYWORDS: [&str; 5] = ["encerrar", "fim", "sair", "cancelar", "tchau"];

fn lower_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Matches a bare numeric token like "2", "2)" or "(2)".
fn numeric_token(text: &str, digit: &str) -> bool {
    let t = text.trim();
    t == digit || t == format!("{digit})") || t == format!("({digit})")
}

/// True when the text is a short numeric menu choice ("1", "(3)", "2."),
/// used to keep unauthenticated users out of the menu.
pub fn is_short_numeric_choice(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() {
        return false;
    }
    SHORT_CHOICE_RE.is_match(t) || DIGIT_PUNCT_RE.is_match(t)
}

/// Exit keywords pre-empt all state logic, case-insensitively.
pub fn contains_exit_keyword(text: &str) -> bool {
    let t = text.to_lowercase();
    EXIT_KEYWORDS.iter().any(|k| t.contains(k))
}

/// Interprets the main menu: numeric token first, then keywords.
pub fn interpret_action_choice(text: &str) -> Option<ServiceChoice> {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }

    if numeric_token(&t, "1") {
        return Some(ServiceChoice::Credito);
    }
    if numeric_token(&t, "2") {
        return Some(ServiceChoice::Interview);
    }
    if numeric_token(&t, "3") {
        return Some(ServiceChoice::Cambio);
    }

    if ["credito", "crédito", "limite", "aumento"].iter().any(|k| t.contains(k)) {
        return Some(ServiceChoice::Credito);
    }
    if ["entrevista", "score", "pontuação", "pontuacao"].iter().any(|k| t.contains(k)) {
        return Some(ServiceChoice::Interview);
    }
    if [
        "câmbio", "cambio", "cotação", "cotacao", "moeda", "dólar", "euro", "usd", "eur", "brl",
    ]
    .iter()
    .any(|k| t.contains(k))
    {
        return Some(ServiceChoice::Cambio);
    }

    None
}

/// Interprets the credit sub-menu (consultar limite / solicitar aumento).
pub fn interpret_credit_action(text: &str) -> Option<CreditAction> {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }

    if numeric_token(&t, "1") {
        return Some(CreditAction::Consultar);
    }
    if numeric_token(&t, "2") {
        return Some(CreditAction::Solicitar);
    }

    if ["consultar", "consulta", "ver limite", "limite atual", "meu limite"]
        .iter()
        .any(|k| t.contains(k))
    {
        return Some(CreditAction::Consultar);
    }
    if ["solicitar", "solicitação", "aumentar", "aumento", "novo limite", "pedir aumento"]
        .iter()
        .any(|k| t.contains(k))
    {
        return Some(CreditAction::Solicitar);
    }

    None
}

/// "Do it again" phrasing, resolved against the action history.
pub fn wants_repeat_last(text: &str) -> bool {
    let t = text.to_lowercase();
    ["de novo", "novamente", "repetir", "igual da outra vez"]
        .iter()
        .any(|k| t.contains(k))
}

/// Asks what the current limit is (inside the increase flow).
pub fn asks_current_limit(text: &str) -> bool {
    let t = text.to_lowercase();
    [
        "qual é o meu limite",
        "qual meu limite",
        "limite atual",
        "esqueci meu limite",
        "meu limite",
        "meu crédito",
        "meu credito",
    ]
    .iter()
    .any(|k| t.contains(k))
}

/// Explicit affirmation ("sim", "s", "quero", "ok", "yes", "claro").
pub fn is_affirmative(text: &str) -> bool {
    lower_tokens(text)
        .iter()
        .any(|w| matches!(w.as_str(), "sim" | "s" | "quero" | "ok" | "yes" | "claro"))
}

/// Explicit decline ("não", "nao", "n").
pub fn is_negative(text: &str) -> bool {
    lower_tokens(text)
        .iter()
        .any(|w| matches!(w.as_str(), "não" | "nao" | "n"))
}

/// Affirmation set for the post-action hub. "quero" is excluded here so
/// phrases like "quero uma cotação" fall through to the topic checks.
pub fn is_hub_affirmative(text: &str) -> bool {
    lower_tokens(text)
        .iter()
        .any(|w| matches!(w.as_str(), "sim" | "s" | "yes" | "ok" | "claro"))
}

/// Asks for the main menu.
pub fn wants_menu(text: &str) -> bool {
    let t = text.to_lowercase();
    ["menu", "opções", "opcoes"].iter().any(|k| t.contains(k))
}

/// Currency topic words, for jumping straight into the exchange flow.
pub fn mentions_exchange_topic(text: &str) -> bool {
    EXCHANGE_TOPIC_RE.is_match(&text.to_lowercase())
}

/// Credit topic words, for jumping straight into the credit flow.
pub fn mentions_credit_topic(text: &str) -> bool {
    CREDIT_TOPIC_RE.is_match(&text.to_lowercase())
}

/// Follow-up inside the exchange "more" menu: another quote?
pub fn wants_another_quote(text: &str) -> bool {
    let t = text.to_lowercase();
    ["cotação", "cotacao", "moeda", "outra", "mais"].iter().any(|k| t.contains(k))
        || is_affirmative(text)
}
