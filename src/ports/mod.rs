//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! All ports are synchronous: each conversation turn is handled to
//! completion before the next is accepted, so external calls are plain
//! blocking calls with no async boundary.

mod client_repository;
mod increase_log;
mod rate_provider;

pub use client_repository::{Client, ClientRepository, RepositoryError};
pub use increase_log::{IncreaseLog, IncreaseRequest, LogError};
pub use rate_provider::{Quote, RateError, RateProvider};
