//! Interview domain - the credit-scoring interview sub-flow.
//!
//! A fixed five-question sequence (renda, emprego, despesas, dependentes,
//! dívidas) with bounded per-question retries, a weighted score formula
//! clamped to 0..=1000, and persistence of the result to the client store.

mod answers;
mod flow;
mod score;

pub use answers::{
    parse_debt_flag, parse_dependent_count, parse_non_negative_amount, DependentBucket,
    Employment, FieldRetries, InterviewAnswers,
};
pub use flow::{InterviewFlow, InterviewTurn, RedirectTarget};
pub use score::calculate as calculate_score;
