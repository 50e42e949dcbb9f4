//! Orchestration over the pure core: one active session plus persistence.

pub mod error;
pub mod scorekeeper;

pub use error::AppError;
pub use scorekeeper::Scorekeeper;
