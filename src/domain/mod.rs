//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (CPF and date extraction)
//! - `triage` - Top-level dialogue orchestration state machine
//! - `interview` - Credit-interview sub state machine and score formula
//! - `credit` - Limit inquiry and increase-decision logic

pub mod credit;
pub mod foundation;
pub mod interview;
pub mod triage;
