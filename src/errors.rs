use thiserror::Error;

use crate::domain::validation::{MAX_DEPOSIT, MIN_AGE};

/// Error type that captures every recoverable ledger failure.
///
/// The `Display` text of each variant is the message shown to the account
/// holder, so lookups that fail for any reason share a single variant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("You must be at least {} years old to create an account.", MIN_AGE)]
    Underage,
    #[error("PIN must be a 4-digit number.")]
    InvalidPin,
    #[error("New PIN must be a 4-digit number.")]
    InvalidNewPin,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Deposit amount must be greater than 0 and at most {}.", MAX_DEPOSIT)]
    InvalidDepositAmount,
    #[error("Withdrawal amount must be greater than 0.")]
    InvalidWithdrawalAmount,
    #[error("Insufficient balance.")]
    InsufficientBalance,
    #[error("Account not found or incorrect PIN.")]
    NotFoundOrIncorrectPin,
    #[error("No changes made.")]
    NoChanges,
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_embed_rule_constants() {
        assert_eq!(
            LedgerError::Underage.to_string(),
            "You must be at least 18 years old to create an account."
        );
        assert_eq!(
            LedgerError::InvalidDepositAmount.to_string(),
            "Deposit amount must be greater than 0 and at most 10000."
        );
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let err: LedgerError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err, LedgerError::Storage("disk full".into()));
    }
}
