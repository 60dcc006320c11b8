use thiserror::Error;
use uuid::Uuid;

/// Error type that captures every failure the ledger surfaces to callers.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Debt not found: {0}")]
    DebtNotFound(Uuid),
    #[error("Debt not found: no id starts with `{0}`")]
    UnknownDebtPrefix(String),
    #[error("Stored ledger is corrupt: {0}")]
    CorruptState(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`LedgerError`] for presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    CorruptState,
    Storage,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Validation(_) => ErrorKind::Validation,
            LedgerError::DebtNotFound(_) | LedgerError::UnknownDebtPrefix(_) => {
                ErrorKind::NotFound
            }
            LedgerError::CorruptState(_) => ErrorKind::CorruptState,
            LedgerError::Storage(_) | LedgerError::Io(_) => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
