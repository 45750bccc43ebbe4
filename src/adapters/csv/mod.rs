//! CSV adapters - file-backed implementations of the data ports.

mod client_store;
mod request_log;
mod score_table;

pub use client_store::CsvClientStore;
pub use request_log::CsvIncreaseLog;
pub use score_table::load_score_limit_table;
