//! Score calculation from interview answers.
//!
//! ```text
//! score = (renda / (despesas + 1)) * 30
//!       + peso_emprego   (formal 300, autônomo 200, desempregado 0)
//!       + peso_dependentes (0 -> 100, 1 -> 80, 2 -> 60, 3+ -> 30)
//!       + peso_dividas   (sim -> -100, não -> +100)
//! ```
//!
//! clamped to 0..=1000 and rounded to the nearest integer.

use super::answers::{DependentBucket, Employment, InterviewAnswers};

const INCOME_WEIGHT: f64 = 30.0;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 1000.0;

fn employment_weight(employment: Employment) -> f64 {
    match employment {
        Employment::Formal => 300.0,
        Employment::Autonomo => 200.0,
        Employment::Desempregado => 0.0,
    }
}

fn dependents_weight(bucket: DependentBucket) -> f64 {
    match bucket {
        DependentBucket::Zero => 100.0,
        DependentBucket::One => 80.0,
        DependentBucket::Two => 60.0,
        DependentBucket::ThreePlus => 30.0,
    }
}

fn debt_weight(has_debt: bool) -> f64 {
    if has_debt {
        -100.0
    } else {
        100.0
    }
}

/// Computes the final score for a fully answered interview.
///
/// Returns `None` when any slot is still unanswered; the flow only calls
/// this after the last question, so `None` indicates a sequencing bug.
pub fn calculate(answers: &InterviewAnswers) -> Option<i64> {
    let renda = answers.renda_mensal?;
    let despesas = answers.despesas_fixas?;
    let emprego = answers.tipo_emprego?;
    let dependentes = answers.dependentes?;
    let tem_dividas = answers.tem_dividas?;

    // +1 in the denominator protects against zero expenses.
    let income_component = (renda / (despesas + 1.0)) * INCOME_WEIGHT;

    let raw = income_component
        + employment_weight(emprego)
        + dependents_weight(dependentes)
        + debt_weight(tem_dividas);

    Some(raw.clamp(SCORE_MIN, SCORE_MAX).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn answers(
        renda: f64,
        despesas: f64,
        emprego: Employment,
        dependentes: DependentBucket,
        tem_dividas: bool,
    ) -> InterviewAnswers {
        InterviewAnswers {
            renda_mensal: Some(renda),
            despesas_fixas: Some(despesas),
            tipo_emprego: Some(emprego),
            dependentes: Some(dependentes),
            tem_dividas: Some(tem_dividas),
        }
    }

    #[test]
    fn formal_no_debt_high_income_scores_high() {
        let a = answers(9000.0, 2000.0, Employment::Formal, DependentBucket::Zero, false);
        // (9000/2001)*30 ≈ 134.9 + 300 + 100 + 100 ≈ 635
        assert_eq!(calculate(&a), Some(635));
    }

    #[test]
    fn unemployed_with_debt_can_floor_at_zero() {
        let a = answers(
            0.0,
            5000.0,
            Employment::Desempregado,
            DependentBucket::ThreePlus,
            true,
        );
        // 0 + 0 + 30 - 100 = -70 -> clamped to 0
        assert_eq!(calculate(&a), Some(0));
    }

    #[test]
    fn huge_income_caps_at_one_thousand() {
        let a = answers(1_000_000.0, 0.0, Employment::Formal, DependentBucket::Zero, false);
        assert_eq!(calculate(&a), Some(1000));
    }

    #[test]
    fn missing_answer_yields_none() {
        let mut a = answers(1000.0, 100.0, Employment::Formal, DependentBucket::One, false);
        a.tem_dividas = None;
        assert_eq!(calculate(&a), None);
    }

    proptest! {
        #[test]
        fn score_is_always_in_range(
            renda in 0.0f64..1_000_000.0,
            despesas in 0.0f64..1_000_000.0,
            emprego_idx in 0usize..3,
            dependentes in 0u32..10,
            tem_dividas in proptest::bool::ANY,
        ) {
            let emprego = [Employment::Formal, Employment::Autonomo, Employment::Desempregado][emprego_idx];
            let a = answers(
                renda,
                despesas,
                emprego,
                DependentBucket::from_count(dependentes),
                tem_dividas,
            );
            let score = calculate(&a).unwrap();
            prop_assert!((0..=1000).contains(&score));
        }
    }
}
