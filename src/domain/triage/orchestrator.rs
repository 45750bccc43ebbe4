//! Triage Orchestrator - the top-level conversation engine.
//!
//! Owns the session, authenticates the customer and routes each turn to
//! the credit, interview or exchange flow. The front end calls `start`
//! once and then `handle_turn` per user message; nothing else is needed
//! to drive a full conversation.
//!
//! Three global rules run before any state logic:
//! 1. an exit keyword ends the conversation from any state;
//! 2. an authenticated session stuck in a pre-auth state is moved
//!    forward to the main menu;
//! 3. a bare numeric menu choice is rejected until authentication is
//!    complete, so nobody skips it by typing "1".

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::credit::{CreditError, CreditService};
use crate::domain::foundation::{extract_cpf, extract_date, normalize_cpf, normalize_date};
use crate::domain::interview::{InterviewFlow, InterviewTurn, RedirectTarget};
use crate::ports::{Client, ClientRepository, RateProvider};

use super::amount::extract_amount;
use super::currency::parse_exchange_text;
use super::intent::{
    asks_current_limit, contains_exit_keyword, interpret_action_choice, interpret_credit_action,
    is_affirmative, is_hub_affirmative, is_negative, is_short_numeric_choice, wants_another_quote,
    wants_menu, wants_repeat_last, CreditAction, ServiceChoice,
};
use super::messages::{self, prompt, PromptKey};
use super::session::{ActionTag, Session};
use super::state::TriageState;

/// Feature switches for the three routed services. All enabled by
/// default; a disabled service gets a polite unavailability answer
/// instead of its flow.
#[derive(Debug, Clone, Copy)]
pub struct ServiceFlags {
    pub credit: bool,
    pub interview: bool,
    pub exchange: bool,
}

impl Default for ServiceFlags {
    fn default() -> Self {
        Self {
            credit: true,
            interview: true,
            exchange: true,
        }
    }
}

/// What the front end renders after one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub assistant: String,
    /// True once the conversation reached its terminal state.
    pub done: bool,
}

impl TurnOutcome {
    fn reply(assistant: impl Into<String>) -> Self {
        Self {
            assistant: assistant.into(),
            done: false,
        }
    }

    fn finished(assistant: impl Into<String>) -> Self {
        Self {
            assistant: assistant.into(),
            done: true,
        }
    }
}

pub struct TriageOrchestrator {
    clients: Arc<dyn ClientRepository>,
    credit: CreditService,
    rates: Arc<dyn RateProvider>,
    interview: InterviewFlow,
    services: ServiceFlags,
    session: Session,
}

impl TriageOrchestrator {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        credit: CreditService,
        rates: Arc<dyn RateProvider>,
        services: ServiceFlags,
    ) -> Self {
        let interview = InterviewFlow::new(clients.clone());
        Self {
            clients,
            credit,
            rates,
            interview,
            services,
            session: Session::new(),
        }
    }

    /// Resets the session and returns the greeting for a new conversation.
    pub fn start(&mut self) -> String {
        self.session.reset();
        prompt(PromptKey::Greeting).to_string()
    }

    /// Handles one user message and returns the assistant reply.
    pub fn handle_turn(&mut self, user_text: &str) -> TurnOutcome {
        let text = user_text.trim();

        if contains_exit_keyword(text) {
            self.session.set_state(TriageState::Final, true);
            return TurnOutcome::finished(messages::GOODBYE_EXIT);
        }

        // Recover a session that authenticated but was left in a
        // pre-auth state.
        if self.session.authenticated && self.session.state.is_pre_auth() {
            self.session.set_state(TriageState::PostAuth, false);
        }

        if !self.session.authenticated && is_short_numeric_choice(text) {
            return TurnOutcome::reply(messages::NEED_AUTH_FOR_MENU);
        }

        match self.session.state {
            TriageState::AskCpf => self.on_ask_cpf(text),
            TriageState::AskDob => self.on_ask_dob(text),
            TriageState::PostAuth => self.on_post_auth(text),
            TriageState::AskCreditAction => self.on_ask_credit_action(text),
            TriageState::AskCreditAmount => self.on_ask_credit_amount(text),
            TriageState::ExchangeAskCurrency => self.on_exchange_ask_currency(text),
            TriageState::InterviewRunning => self.on_interview_running(text),
            TriageState::ConfirmRedirectCredit => self.on_confirm_redirect_credit(text),
            TriageState::OfferInterview => self.on_offer_interview(text),
            TriageState::AskMore => self.on_ask_more(text),
            TriageState::CreditMoreMenu => self.on_credit_more_menu(text),
            TriageState::ExchangeMoreMenu => self.on_exchange_more_menu(text),
            TriageState::Final => TurnOutcome::finished(messages::GOODBYE_DONE),
        }
    }

    // ----- authentication -------------------------------------------------

    fn lookup_client(&self, cpf: &str, dob: &str) -> Option<Client> {
        match self.clients.find_by_cpf_and_dob(cpf, dob) {
            Ok(found) => found,
            Err(err) => {
                warn!(%err, "client lookup failed during authentication");
                None
            }
        }
    }

    fn complete_authentication(&mut self, client: Client) -> TurnOutcome {
        info!(cpf = %client.cpf, "customer authenticated");
        self.session.authenticate(Some(client.nome));
        self.session.set_state(TriageState::PostAuth, true);
        TurnOutcome::reply(messages::post_auth_menu(self.session.display_name()))
    }

    fn failed_authentication(&mut self) -> TurnOutcome {
        self.session.attempts += 1;
        let remaining = self.session.max_attempts.saturating_sub(self.session.attempts);

        if self.session.attempts >= self.session.max_attempts {
            self.session.set_state(TriageState::Final, true);
            return TurnOutcome::finished(messages::AUTH_EXHAUSTED);
        }

        self.session.cpf.clear();
        self.session.dob.clear();
        self.session.set_state(TriageState::AskCpf, true);
        TurnOutcome::reply(messages::retry_message(remaining))
    }

    fn on_ask_cpf(&mut self, text: &str) -> TurnOutcome {
        let cpf_found = extract_cpf(text);
        if cpf_found.is_empty() {
            return TurnOutcome::reply(prompt(PromptKey::AskCpf));
        }
        self.session.cpf = normalize_cpf(&cpf_found);

        // CPF and birth date may arrive in the same message.
        let date_in_msg = extract_date(text);
        if !date_in_msg.is_empty() {
            self.session.dob = normalize_date(&date_in_msg);
            let cpf = self.session.cpf.clone();
            let dob = self.session.dob.clone();
            if let Some(client) = self.lookup_client(&cpf, &dob) {
                return self.complete_authentication(client);
            }
            return self.failed_authentication();
        }

        self.session.set_state(TriageState::AskDob, false);
        TurnOutcome::reply(prompt(PromptKey::AskDob))
    }

    fn on_ask_dob(&mut self, text: &str) -> TurnOutcome {
        let dob_found = extract_date(text);
        if dob_found.is_empty() {
            return TurnOutcome::reply(messages::DOB_FORMAT_ERROR);
        }

        self.session.dob = normalize_date(&dob_found);
        let cpf = self.session.cpf.clone();
        let dob = self.session.dob.clone();
        if let Some(client) = self.lookup_client(&cpf, &dob) {
            return self.complete_authentication(client);
        }
        self.failed_authentication()
    }

    // ----- main menu ------------------------------------------------------

    fn on_post_auth(&mut self, text: &str) -> TurnOutcome {
        let mut choice = interpret_action_choice(text);

        // "de novo" with no explicit service: repeat the last action.
        if choice.is_none() && wants_repeat_last(text) {
            choice = self.session.last_in_history().map(|tag| match tag {
                ActionTag::Credit => ServiceChoice::Credito,
                ActionTag::Exchange => ServiceChoice::Cambio,
                ActionTag::Interview => ServiceChoice::Interview,
            });
        }

        match choice {
            Some(ServiceChoice::Credito) => {
                if self.services.credit {
                    self.session.record_action(ActionTag::Credit);
                    self.session.set_state(TriageState::AskCreditAction, true);
                    return TurnOutcome::reply(prompt(PromptKey::AskCreditAction));
                }
                TurnOutcome::reply(format!(
                    "{}{}",
                    messages::CREDIT_UNAVAILABLE,
                    prompt(PromptKey::AskMore)
                ))
            }
            Some(ServiceChoice::Interview) => self.enter_interview(),
            Some(ServiceChoice::Cambio) => {
                if self.services.exchange {
                    self.session.record_action(ActionTag::Exchange);
                    self.session.set_state(TriageState::ExchangeAskCurrency, true);
                    return TurnOutcome::reply(prompt(PromptKey::AskExchange));
                }
                TurnOutcome::reply(format!(
                    "{}{}",
                    messages::EXCHANGE_UNAVAILABLE,
                    prompt(PromptKey::AskMore)
                ))
            }
            None => TurnOutcome::reply(messages::post_auth_menu(self.session.display_name())),
        }
    }

    /// Starts the interview, or offers the credit flow when the interview
    /// service is switched off.
    fn enter_interview(&mut self) -> TurnOutcome {
        if !self.services.interview {
            self.session.set_state(TriageState::ConfirmRedirectCredit, false);
            return TurnOutcome::reply(messages::INTERVIEW_UNAVAILABLE_REDIRECT);
        }

        if !self.session.authenticated || self.session.cpf.is_empty() {
            return TurnOutcome::reply(messages::NEED_AUTH_FOR_INTERVIEW);
        }

        self.session.record_action(ActionTag::Interview);
        let cpf = self.session.cpf.clone();
        let start_msg = self.interview.start(&cpf);
        self.session.set_state(TriageState::InterviewRunning, true);
        TurnOutcome::reply(start_msg)
    }

    fn on_confirm_redirect_credit(&mut self, text: &str) -> TurnOutcome {
        if is_affirmative(text) {
            self.session.record_action(ActionTag::Credit);
            self.session.set_state(TriageState::AskCreditAction, true);
            return TurnOutcome::reply(prompt(PromptKey::AskCreditAction));
        }
        if is_negative(text) {
            self.session.set_state(TriageState::AskMore, false);
            return TurnOutcome::reply(prompt(PromptKey::AskMore));
        }
        TurnOutcome::reply(messages::CONFIRM_YES_OR_NO)
    }

    // ----- credit ---------------------------------------------------------

    fn on_ask_credit_action(&mut self, text: &str) -> TurnOutcome {
        match interpret_credit_action(text) {
            Some(CreditAction::Consultar) => self.run_limit_inquiry(),
            Some(CreditAction::Solicitar) => {
                self.session.set_state(TriageState::AskCreditAmount, true);
                TurnOutcome::reply(prompt(PromptKey::AskCreditAmount))
            }
            None => TurnOutcome::reply(format!(
                "{} {}",
                messages::CREDIT_ACTION_RETRY,
                prompt(PromptKey::AskCreditAction)
            )),
        }
    }

    fn run_limit_inquiry(&mut self) -> TurnOutcome {
        let cpf = self.session.cpf.clone();
        match self.credit.inquire(&cpf) {
            Ok(standing) => {
                let line =
                    messages::current_limit_line(standing.limite_atual, self.session.display_name());
                self.session.record_action(ActionTag::Credit);
                self.session.set_state(TriageState::AskMore, true);
                TurnOutcome::reply(format!("{line}{}", prompt(PromptKey::AskMore)))
            }
            Err(err) => {
                warn!(%err, "limit inquiry failed");
                self.session.set_state(TriageState::AskMore, false);
                TurnOutcome::reply(format!(
                    "{}{}",
                    messages::CLIENT_DATA_NOT_FOUND,
                    prompt(PromptKey::AskMore)
                ))
            }
        }
    }

    fn submit_increase(&mut self, amount: f64) -> TurnOutcome {
        let cpf = self.session.cpf.clone();
        let decision = match self.credit.request_increase(&cpf, amount) {
            Ok(decision) => decision,
            Err(err) => {
                if !matches!(err, CreditError::ClientNotFound) {
                    warn!(%err, "increase request failed");
                }
                self.session.set_state(TriageState::AskMore, false);
                return TurnOutcome::reply(format!(
                    "{}{}",
                    messages::REQUEST_NOT_PROCESSED,
                    prompt(PromptKey::AskMore)
                ));
            }
        };

        self.session.record_action(ActionTag::Credit);

        if decision.approved() {
            let line =
                messages::increase_approved(&decision.reason, self.session.display_name());
            self.session.set_state(TriageState::AskMore, true);
            return TurnOutcome::reply(format!("{line}{}", prompt(PromptKey::AskMore)));
        }

        self.session.set_state(TriageState::OfferInterview, false);
        TurnOutcome::reply(messages::increase_rejected(&decision.reason))
    }

    fn on_ask_credit_amount(&mut self, text: &str) -> TurnOutcome {
        let amount = extract_amount(text);
        let asks_limit = asks_current_limit(text);

        // Customer wants to see the current limit before naming a value.
        if asks_limit && amount.is_none() {
            let cpf = self.session.cpf.clone();
            return match self.credit.inquire(&cpf) {
                Ok(standing) => {
                    self.session.awaiting_amount_after_show_limit = true;
                    TurnOutcome::reply(messages::limit_then_ask_amount(standing.limite_atual))
                }
                Err(err) => {
                    warn!(%err, "limit inquiry failed");
                    self.session.set_state(TriageState::AskMore, false);
                    TurnOutcome::reply(format!(
                        "{}{}",
                        messages::CLIENT_DATA_NOT_LOCATED,
                        prompt(PromptKey::AskMore)
                    ))
                }
            };
        }

        // Limit already shown; now expecting a value or a decline.
        if self.session.awaiting_amount_after_show_limit {
            if is_negative(text) {
                self.session.awaiting_amount_after_show_limit = false;
                self.session.set_state(TriageState::AskMore, false);
                return TurnOutcome::reply(prompt(PromptKey::AskMore));
            }
            if let Some(value) = amount {
                self.session.awaiting_amount_after_show_limit = false;
                return self.submit_increase(value);
            }
            return TurnOutcome::reply(messages::AMOUNT_OR_NO_AFTER_LIMIT);
        }

        match amount {
            Some(value) => self.submit_increase(value),
            None => TurnOutcome::reply(format!(
                "{} {}",
                messages::AMOUNT_NOT_UNDERSTOOD,
                prompt(PromptKey::AskCreditAmount)
            )),
        }
    }

    // ----- exchange -------------------------------------------------------

    fn on_exchange_ask_currency(&mut self, text: &str) -> TurnOutcome {
        let (base, target) = parse_exchange_text(text);
        self.session.clear_transient_flags();

        let reply = match self.rates.get_rate(&base, &target) {
            Ok(quote) => format!(
                "{}{}",
                messages::quote_line(&quote.base, quote.rate, &quote.target),
                prompt(PromptKey::AskMore)
            ),
            Err(err) => format!("{err} {}", prompt(PromptKey::AskMore)),
        };

        self.session.record_action(ActionTag::Exchange);
        self.session.set_state(TriageState::AskMore, false);
        TurnOutcome::reply(reply)
    }

    // ----- interview ------------------------------------------------------

    fn on_interview_running(&mut self, text: &str) -> TurnOutcome {
        match self.interview.handle(text) {
            InterviewTurn::Continue(msg) => TurnOutcome::reply(msg),
            InterviewTurn::Finished {
                text: closing,
                redirect: Some(RedirectTarget::Credit),
            } => {
                self.session.record_action(ActionTag::Credit);
                self.session.set_state(TriageState::AskCreditAction, true);
                TurnOutcome::reply(format!(
                    "{closing} {}{}",
                    messages::CREDIT_REOPEN_AFTER_INTERVIEW,
                    prompt(PromptKey::AskCreditAction)
                ))
            }
            InterviewTurn::Finished {
                text: closing,
                redirect: None,
            } => {
                self.session.set_state(TriageState::PostAuth, false);
                let menu = messages::post_auth_menu(self.session.display_name());
                TurnOutcome::reply(format!("{closing} {menu}"))
            }
        }
    }

    fn on_offer_interview(&mut self, text: &str) -> TurnOutcome {
        if is_affirmative(text) {
            if self.services.interview {
                return self.enter_interview();
            }
            self.session.set_state(TriageState::AskMore, false);
            return TurnOutcome::reply(format!(
                "{}{}",
                messages::INTERVIEW_NOT_IMPLEMENTED,
                prompt(PromptKey::AskMore)
            ));
        }
        if is_negative(text) {
            self.session.set_state(TriageState::AskMore, false);
            return TurnOutcome::reply(prompt(PromptKey::AskMore));
        }
        TurnOutcome::reply(messages::OFFER_INTERVIEW_RETRY)
    }

    // ----- post-action hub ------------------------------------------------

    fn on_ask_more(&mut self, text: &str) -> TurnOutcome {
        if is_negative(text) {
            self.session.set_state(TriageState::Final, true);
            return TurnOutcome::finished(messages::GOODBYE_DONE);
        }

        if wants_menu(text) {
            self.session.set_state(TriageState::PostAuth, false);
            return TurnOutcome::reply(messages::post_auth_menu(self.session.display_name()));
        }

        if is_hub_affirmative(text) {
            return match self.session.last_action {
                Some(ActionTag::Exchange) => {
                    self.session.set_state(TriageState::ExchangeMoreMenu, false);
                    TurnOutcome::reply(messages::EXCHANGE_MORE_MENU)
                }
                Some(ActionTag::Credit) => {
                    self.session.set_state(TriageState::CreditMoreMenu, false);
                    TurnOutcome::reply(messages::CREDIT_MORE_MENU)
                }
                _ => {
                    self.session.set_state(TriageState::PostAuth, false);
                    TurnOutcome::reply(messages::post_auth_menu(self.session.display_name()))
                }
            };
        }

        // Topic words jump straight into the matching flow.
        if super::intent::mentions_exchange_topic(text) {
            self.session.record_action(ActionTag::Exchange);
            self.session.set_state(TriageState::ExchangeAskCurrency, true);
            return TurnOutcome::reply(prompt(PromptKey::AskExchange));
        }
        if super::intent::mentions_credit_topic(text) {
            self.session.record_action(ActionTag::Credit);
            self.session.set_state(TriageState::AskCreditAction, true);
            return TurnOutcome::reply(prompt(PromptKey::AskCreditAction));
        }

        TurnOutcome::reply(messages::ASK_MORE_GUIDANCE)
    }

    fn on_credit_more_menu(&mut self, text: &str) -> TurnOutcome {
        if wants_menu(text) {
            self.session.set_state(TriageState::PostAuth, false);
            return TurnOutcome::reply(messages::post_auth_menu(self.session.display_name()));
        }

        match interpret_credit_action(text) {
            Some(CreditAction::Consultar) => self.run_limit_inquiry(),
            Some(CreditAction::Solicitar) => {
                self.session.record_action(ActionTag::Credit);
                self.session.set_state(TriageState::AskCreditAmount, true);
                TurnOutcome::reply(prompt(PromptKey::AskCreditAmount))
            }
            None => TurnOutcome::reply(messages::CREDIT_MORE_MENU_RETRY),
        }
    }

    fn on_exchange_more_menu(&mut self, text: &str) -> TurnOutcome {
        if wants_menu(text) {
            self.session.set_state(TriageState::PostAuth, false);
            return TurnOutcome::reply(messages::post_auth_menu(self.session.display_name()));
        }

        if wants_another_quote(text) {
            self.session.record_action(ActionTag::Exchange);
            self.session.set_state(TriageState::ExchangeAskCurrency, true);
            return TurnOutcome::reply(prompt(PromptKey::AskExchange));
        }

        if is_negative(text) {
            self.session.set_state(TriageState::Final, true);
            return TurnOutcome::finished(messages::GOODBYE_DONE);
        }

        TurnOutcome::reply(messages::EXCHANGE_MORE_MENU_RETRY)
    }
}
