//! Banco Ágil - terminal front end.
//!
//! Wires the CSV stores, the rules table and the rate provider into one
//! triage orchestrator and drives it from stdin until the conversation
//! finishes. Logs go to stderr so the dialogue on stdout stays clean.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use banco_agil::adapters::{
    load_score_limit_table, ApiLayerRateProvider, CsvClientStore, CsvIncreaseLog,
};
use banco_agil::config::AppConfig;
use banco_agil::domain::credit::CreditService;
use banco_agil::domain::triage::TriageOrchestrator;
use banco_agil::ports::ClientRepository;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "startup failed");
            eprintln!("Erro ao iniciar o Banco Ágil: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let clients: Arc<dyn ClientRepository> =
        Arc::new(CsvClientStore::new(&config.data.clients_csv));
    let table = load_score_limit_table(&config.data.score_table_csv)?;
    let log = Arc::new(CsvIncreaseLog::new(&config.data.requests_csv));
    let credit = CreditService::new(clients.clone(), table, log);
    let rates = Arc::new(ApiLayerRateProvider::new(&config.exchange)?);

    let mut orchestrator =
        TriageOrchestrator::new(clients, credit, rates, config.services.flags());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", orchestrator.start())?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = orchestrator.handle_turn(&line);
        writeln!(stdout, "{}", outcome.assistant)?;
        if outcome.done {
            break;
        }
        stdout.flush()?;
    }

    Ok(())
}
