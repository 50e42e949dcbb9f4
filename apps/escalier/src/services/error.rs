use thiserror::Error;

use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The in-memory state already reflects the operation; only the save failed.
    #[error("session could not be saved: {0}")]
    Store(#[from] StoreError),

    #[error("no active session")]
    NoActiveSession,
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(e) => e.code(),
            AppError::Store(e) => e.code(),
            AppError::NoActiveSession => ErrorCode::NoActiveSession,
        }
    }

    /// The domain error, when this is one.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
