//! Foundation module - Shared domain primitives.
//!
//! Pure text-to-value extraction for the two identity fields the triage
//! flow authenticates on: CPF and birth date. Extraction failure is an
//! empty string, not an error; callers re-prompt.

mod cpf;
mod dates;

pub use cpf::{extract_cpf, normalize_cpf};
pub use dates::{extract_date, normalize_date};
