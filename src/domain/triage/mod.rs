//! Triage domain - the top-level conversation state machine.
//!
//! Authenticates the customer (CPF plus birth date, three attempts) and
//! routes every turn to the credit, interview or exchange flow. The
//! orchestrator is the single entry point; the remaining modules are its
//! parsing and copy helpers.

mod amount;
mod currency;
mod intent;
mod messages;
mod orchestrator;
mod session;
mod state;

pub use amount::extract_amount;
pub use currency::parse_exchange_text;
pub use orchestrator::{ServiceFlags, TriageOrchestrator, TurnOutcome};
pub use session::{ActionTag, Session, MAX_AUTH_ATTEMPTS};
pub use state::TriageState;
