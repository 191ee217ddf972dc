//! Error types for ledgerweb-core

use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Ledger file not found
    FileNotFound,
    /// Entry failed to parse
    ParseError,
    /// Storage failure
    StorageError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Ledger file not found: {id}")]
    FileNotFound { id: i64 },

    #[error("Invalid entry: {0}")]
    Parse(#[from] ledgerweb_parser::ParseError),

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::Parse(_) => ErrorCode::ParseError,
            CoreError::Storage { .. } => ErrorCode::StorageError,
        }
    }
}
