//! Canonical user-facing texts for the triage conversation.
//!
//! Every customer-visible sentence lives here so flow code composes
//! messages instead of embedding copy. All texts are Brazilian
//! Portuguese.

/// Keys of the static prompt catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Greeting,
    AskCpf,
    AskDob,
    AskCreditAction,
    AskCreditAmount,
    AskExchange,
    AskMore,
}

/// Static prompt for the given key.
pub fn prompt(key: PromptKey) -> &'static str {
    match key {
        PromptKey::Greeting => {
            "Olá! Seja bem-vindo ao Banco Ágil. Para começarmos, por favor informe o seu CPF \
             (somente números, sem pontos ou traços) para autenticarmos sua entrada."
        }
        PromptKey::AskCpf => {
            "Por favor, informe seu CPF (somente números, sem pontos ou traços). Ex.: 12345678901."
        }
        PromptKey::AskDob => {
            "Agora informe sua data de nascimento no formato DD/MM/AAAA. Ex.: 07/07/1985."
        }
        PromptKey::AskCreditAction => {
            "Escolha: (1) consultar seu limite atual ou (2) solicitar aumento de limite."
        }
        PromptKey::AskCreditAmount => {
            "Informe o novo limite desejado (apenas números). Ex.: 5000 ou 1500.50."
        }
        PromptKey::AskExchange => {
            "Por favor informe a moeda e o sentido da cotação (ex.: 'USD para BRL' ou 'EUR')."
        }
        PromptKey::AskMore => "Posso ajudar em mais alguma coisa? Responda 'sim' ou 'não'.",
    }
}

pub const GOODBYE_EXIT: &str = "Conversa encerrada. Obrigado por usar o Banco Ágil.";
pub const GOODBYE_DONE: &str = "Obrigado por usar o Banco Ágil. Tenha um bom dia!";

pub const AUTH_EXHAUSTED: &str = "Não foi possível autenticar após 3 tentativas. \
     Por favor, tente novamente mais tarde ou contate o suporte.";

pub const NEED_AUTH_FOR_MENU: &str = "Para prosseguir com as opções, preciso primeiro autenticar \
     você. Por favor, informe seu CPF (somente números, sem pontos ou traços).";

pub const NEED_AUTH_FOR_INTERVIEW: &str =
    "Preciso autenticar sua conta primeiro. Informe seu CPF (somente números).";

pub const DOB_FORMAT_ERROR: &str = "Esse formato está incorreto. Por favor, informe sua data de \
     nascimento no formato DD/MM/AAAA. Exemplo: 07/07/1985.";

pub const CONFIRM_YES_OR_NO: &str = "Por favor responda 'sim' ou 'não'.";

pub const INTERVIEW_UNAVAILABLE_REDIRECT: &str =
    "No momento a entrevista para ajuste de score não está disponível. Posso abrir as opções de \
     Crédito (consultar limite / solicitar aumento) para você? (responda sim ou não)";

pub const INTERVIEW_NOT_IMPLEMENTED: &str =
    "No momento a entrevista de crédito não está implementada. ";

pub const CREDIT_UNAVAILABLE: &str = "Serviço de crédito indisponível no momento. ";
pub const EXCHANGE_UNAVAILABLE: &str = "Serviço de câmbio indisponível no momento. ";

pub const CREDIT_ACTION_RETRY: &str =
    "Por favor escolha 1 ou 2 (consultar limite / solicitar aumento).";

pub const AMOUNT_NOT_UNDERSTOOD: &str =
    "Não entendi o valor. Informe apenas números, ex.: 5000 ou 1500.50.";

pub const AMOUNT_OR_NO_AFTER_LIMIT: &str = "Se deseja solicitar aumento, informe o novo valor \
     (apenas números) ou responda 'não' para encerrar.";

pub const CLIENT_DATA_NOT_FOUND: &str = "Não foi possível encontrar seus dados. ";
pub const CLIENT_DATA_NOT_LOCATED: &str = "Não foi possível localizar seus dados. ";
pub const REQUEST_NOT_PROCESSED: &str = "Não foi possível processar sua solicitação. ";

pub const OFFER_INTERVIEW_SUFFIX: &str = "Deseja ser encaminhado para a entrevista de crédito \
     para tentar reajustar seu score? (responda sim ou não)";

pub const OFFER_INTERVIEW_RETRY: &str =
    "Não entendi. Deseja seguir para a entrevista de crédito? Responda 'sim' ou 'não'.";

pub const CREDIT_REOPEN_AFTER_INTERVIEW: &str =
    "Agora vou abrir as opções de crédito para nova análise. ";

pub const EXCHANGE_MORE_MENU: &str = "Quer consultar outra cotação de moeda ou voltar ao menu \
     principal?\n- Digite 'cotação' ou 'moeda' para ver outra moeda.\n- Digite 'menu' para \
     voltar às opções principais.";

pub const CREDIT_MORE_MENU: &str = "Deseja consultar crédito novamente? Escolha uma opção:\n- \
     'consultar' para ver o limite atual\n- 'solicitar' para pedir um novo aumento de limite\n\
     Ou escreva 'menu' para ver outras opções.";

pub const CREDIT_MORE_MENU_RETRY: &str =
    "Não entendi. Digite 'consultar', 'solicitar' ou 'menu' para voltar às opções principais.";

pub const EXCHANGE_MORE_MENU_RETRY: &str = "Quer ver outra cotação ou voltar ao menu? Escreva \
     'moeda' para nova cotação ou 'menu' para as opções.";

pub const ASK_MORE_GUIDANCE: &str = "Por favor responda 'sim' ou 'não'. Se quiser ver o menu, \
     escreva 'menu'. Se quiser continuar em crédito, mencione 'limite' ou 'aumento'. Para \
     câmbio, escreva 'cotação' ou 'moeda'.";

/// Authentication retry notice with remaining attempt count.
pub fn retry_message(remaining: u8) -> String {
    let plural = if remaining != 1 { "s" } else { "" };
    format!(
        "Não autenticado — restam {remaining} tentativa{plural}. Verifique seus dados \
         (CPF e data de nascimento) e tente novamente."
    )
}

/// Main menu shown right after authentication and on "menu" requests.
pub fn post_auth_menu(name: &str) -> String {
    format!(
        "Você foi autenticado, {name}. Em que posso ajudar? Opções: \
         (1) Crédito — consultar limite ou solicitar aumento \
         (2) Entrevista de crédito para tentar melhorar o score \
         (3) Consultar cotação de moedas \
         Por favor escolha 1, 2 ou 3, ou descreva o que deseja."
    )
}

/// Current-limit statement used by the inquiry flow.
pub fn current_limit_line(limite: f64, name: &str) -> String {
    format!("Seu limite atual é R$ {limite:.2}. Obrigado, {name}. ")
}

/// Current-limit statement inside the increase flow, inviting an amount.
pub fn limit_then_ask_amount(limite: f64) -> String {
    format!(
        "Seu limite atual é R$ {limite:.2}. Deseja solicitar aumento de limite? Se sim, informe \
         o novo valor (apenas números) agora; se não, responda 'não'."
    )
}

/// Approved-increase statement.
pub fn increase_approved(reason: &str, name: &str) -> String {
    format!("Solicitação aprovada. {reason} Obrigado, {name}. ")
}

/// Rejected-increase statement plus the interview offer.
pub fn increase_rejected(reason: &str) -> String {
    format!("Solicitação rejeitada. {reason} {OFFER_INTERVIEW_SUFFIX}")
}

/// Quote statement ("Cotação atual: 1 USD = 5.20 BRL.").
pub fn quote_line(base: &str, rate: f64, target: &str) -> String {
    format!("Cotação atual: 1 {base} = {rate:.2} {target}. ")
}
