#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod report;
pub mod services;
pub mod store;
pub mod telemetry;

// Re-exports for public API
pub use config::{store_path, SessionConfig};
pub use domain::{
    AbandonBudget, Entry, GameOptions, GameSession, Phase, RoundScores, Seat, SeatAction,
    Standing,
};
pub use errors::{DomainError, ErrorCode};
pub use services::{AppError, Scorekeeper};
pub use store::{JsonFileStore, MemoryStore, SessionStore, StoreError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    escalier_test_support::logging::init();
}
