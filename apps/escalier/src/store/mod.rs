//! Persistence seam for the active session.
//!
//! The core never touches storage; the service encodes the whole
//! [`GameSession`](crate::domain::GameSession) into a blob after every
//! commit and hands it to a [`SessionStore`].

pub mod codec;
pub mod file;
pub mod memory;

use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session blob is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("stored session is corrupt: {0}")]
    Corrupt(DomainError),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Io(_) => ErrorCode::StorageError,
            StoreError::Serde(_) | StoreError::Corrupt(_) => ErrorCode::DataCorruption,
        }
    }
}

/// Key/value storage holding at most one session blob.
pub trait SessionStore {
    fn save(&mut self, blob: &[u8]) -> Result<(), StoreError>;

    /// `None` when nothing has been saved (or it was cleared).
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;

    fn clear(&mut self) -> Result<(), StoreError>;
}
