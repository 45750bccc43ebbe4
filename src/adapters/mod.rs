//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `csv` - CSV-backed client store, rules table and request log
//! - `exchange` - apilayer exchangerates_data HTTP client

pub mod csv;
pub mod exchange;

pub use csv::{load_score_limit_table, CsvClientStore, CsvIncreaseLog};
pub use exchange::ApiLayerRateProvider;
