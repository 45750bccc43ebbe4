//! Top-level conversation states.
//!
//! The orchestrator dispatches every turn on this closed enum; matches
//! over it are exhaustive, so an unhandled state is a compile error
//! rather than a silent fall-through.

/// Position of the conversation in the triage state machine.
///
/// Initial state is [`TriageState::AskCpf`]; [`TriageState::Final`] is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageState {
    /// Waiting for the customer's CPF.
    AskCpf,
    /// CPF captured, waiting for the birth date.
    AskDob,
    /// Authenticated; main menu shown.
    PostAuth,
    /// Credit flow: choosing between inquiry and increase.
    AskCreditAction,
    /// Credit flow: waiting for the requested new limit.
    AskCreditAmount,
    /// Exchange flow: waiting for the currency pair.
    ExchangeAskCurrency,
    /// Interview sub-flow owns the turns until it finishes.
    InterviewRunning,
    /// Interview unavailable; asked whether to open credit instead.
    ConfirmRedirectCredit,
    /// Increase rejected; asked whether to take the scoring interview.
    OfferInterview,
    /// Generic "anything else?" hub after a completed action.
    AskMore,
    /// Credit-specific follow-up menu.
    CreditMoreMenu,
    /// Exchange-specific follow-up menu.
    ExchangeMoreMenu,
    /// Conversation over; no further turns are processed.
    Final,
}

impl TriageState {
    /// States that belong to the authentication sub-protocol.
    pub fn is_pre_auth(&self) -> bool {
        matches!(self, TriageState::AskCpf | TriageState::AskDob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_states_are_pre_auth() {
        assert!(TriageState::AskCpf.is_pre_auth());
        assert!(TriageState::AskDob.is_pre_auth());
        assert!(!TriageState::PostAuth.is_pre_auth());
    }
}
