//! Per-conversation session state.
//!
//! One `Session` value holds everything the orchestrator remembers
//! between turns: state-machine position, authentication progress, the
//! last completed action and a bounded action history. It is owned
//! exclusively by one conversation; there are no shared globals.

use tracing::debug;

use super::state::TriageState;

/// Tag of a completed sub-flow, used to resolve "again" / "more of the
/// same" follow-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTag {
    Credit,
    Exchange,
    Interview,
}

/// Bounded history capacity; oldest entries are evicted.
const HISTORY_CAP: usize = 20;

/// Maximum failed authentication attempts before the session ends.
pub const MAX_AUTH_ATTEMPTS: u8 = 3;

/// Conversational state carried across turns.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub state: TriageState,
    /// Failed authentication tries so far.
    pub attempts: u8,
    pub max_attempts: u8,
    /// Digits-only CPF once captured.
    pub cpf: String,
    /// ISO birth date once captured.
    pub dob: String,
    /// Never reverts to false within a session except on reset.
    pub authenticated: bool,
    /// Display name fixed at authentication time.
    pub authenticated_name: Option<String>,
    /// Most recently completed sub-flow.
    pub last_action: Option<ActionTag>,
    /// True only between "show my limit" inside the increase flow and the
    /// next reply.
    pub awaiting_amount_after_show_limit: bool,
    history: Vec<ActionTag>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: TriageState::AskCpf,
            attempts: 0,
            max_attempts: MAX_AUTH_ATTEMPTS,
            cpf: String::new(),
            dob: String::new(),
            authenticated: false,
            authenticated_name: None,
            last_action: None,
            awaiting_amount_after_show_limit: false,
            history: Vec::new(),
        }
    }

    /// Returns the session to its initial state for a fresh conversation.
    pub fn reset(&mut self) {
        *self = Session::new();
    }

    /// Moves the state machine, optionally clearing transient flags that
    /// only make sense inside a sub-flow.
    pub fn set_state(&mut self, new_state: TriageState, clear_flags: bool) {
        debug!(from = ?self.state, to = ?new_state, "triage state transition");
        self.state = new_state;
        if clear_flags {
            self.clear_transient_flags();
        }
    }

    pub fn clear_transient_flags(&mut self) {
        self.awaiting_amount_after_show_limit = false;
    }

    /// Records a completed action as both `last_action` and a history
    /// entry (bounded; oldest evicted).
    pub fn record_action(&mut self, action: ActionTag) {
        self.last_action = Some(action);
        self.history.push(action);
        if self.history.len() > HISTORY_CAP {
            let excess = self.history.len() - HISTORY_CAP;
            self.history.drain(..excess);
        }
    }

    pub fn last_in_history(&self) -> Option<ActionTag> {
        self.history.last().copied()
    }

    /// Display name for messages; "cliente" before a name is known.
    pub fn display_name(&self) -> &str {
        self.authenticated_name.as_deref().unwrap_or("cliente")
    }

    /// Marks the session authenticated. The name sticks for the rest of
    /// the session.
    pub fn authenticate(&mut self, name: Option<String>) {
        self.authenticated = true;
        self.authenticated_name = Some(match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => "cliente".to_string(),
        });
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
