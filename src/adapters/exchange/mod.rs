//! Exchange adapters - currency-rate provider implementations.

mod apilayer;

pub use apilayer::ApiLayerRateProvider;
