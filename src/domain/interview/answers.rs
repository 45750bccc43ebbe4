//! Interview answer slots and per-field parsing.
//!
//! Each question has its own validation: money fields take non-negative
//! decimals, employment and debt are keyword-classified into closed sets,
//! dependents is a non-negative integer bucketed at three or more.

/// Employment category, as classified from a free-text answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Employment {
    Formal,
    Autonomo,
    Desempregado,
}

impl Employment {
    /// Classifies an answer; `None` when no keyword matches.
    pub fn parse(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        if ["formal", "empregado", "clt"].iter().any(|k| t.contains(k)) {
            Some(Employment::Formal)
        } else if ["autônomo", "autonomo"].iter().any(|k| t.contains(k)) {
            Some(Employment::Autonomo)
        } else if ["desempregado", "sem emprego", "desemprego"]
            .iter()
            .any(|k| t.contains(k))
        {
            Some(Employment::Desempregado)
        } else {
            None
        }
    }
}

/// Dependent-count bucket; three or more collapse into one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentBucket {
    Zero,
    One,
    Two,
    ThreePlus,
}

impl DependentBucket {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => DependentBucket::Zero,
            1 => DependentBucket::One,
            2 => DependentBucket::Two,
            _ => DependentBucket::ThreePlus,
        }
    }
}

/// Parses a non-negative decimal amount ("3500.50", "3500,50").
///
/// The whole trimmed answer must be the number; this is a direct answer
/// to a numeric question, not free text.
pub fn parse_non_negative_amount(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => Some(v),
        _ => None,
    }
}

/// Parses a non-negative dependent count, tolerating "2.0" style input.
pub fn parse_dependent_count(text: &str) -> Option<u32> {
    let v = text.trim().replace(',', ".").parse::<f64>().ok()?;
    if !v.is_finite() || v < 0.0 {
        return None;
    }
    Some(v as u32)
}

/// Classifies a yes/no debts answer. Single-letter forms ("s", "n") are
/// matched as whole tokens so they do not fire inside ordinary words.
pub fn parse_debt_flag(text: &str) -> Option<bool> {
    let t = text.to_lowercase();
    let tokens: Vec<&str> = t
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect();

    // Negation wins: "não tenho" must not read as "tenho".
    if tokens.iter().any(|w| matches!(*w, "não" | "nao" | "n")) {
        Some(false)
    } else if tokens.iter().any(|w| matches!(*w, "sim" | "s" | "tenho" | "possuo")) {
        Some(true)
    } else {
        None
    }
}

/// The five answer slots, each `None` until answered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterviewAnswers {
    pub renda_mensal: Option<f64>,
    pub tipo_emprego: Option<Employment>,
    pub despesas_fixas: Option<f64>,
    pub dependentes: Option<DependentBucket>,
    pub tem_dividas: Option<bool>,
}

/// Independent retry counter per question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldRetries {
    pub renda_mensal: u8,
    pub tipo_emprego: u8,
    pub despesas_fixas: u8,
    pub dependentes: u8,
    pub tem_dividas: u8,
}
