//! Banco Ágil - Conversational Retail-Banking Triage
//!
//! This crate implements the multi-turn dialogue state machine that
//! authenticates a customer and routes the conversation between credit,
//! credit-interview and currency-exchange flows.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
