//! Field rules applied before any account is created or mutated.

use crate::errors::{LedgerError, LedgerResult};

/// Minimum age required to open an account.
pub const MIN_AGE: u32 = 18;
/// Largest amount accepted by a single deposit.
pub const MAX_DEPOSIT: f64 = 10_000.0;
/// Number of digits in a PIN.
pub const PIN_LENGTH: usize = 4;

pub fn validate_age(age: u32) -> LedgerResult<()> {
    if age < MIN_AGE {
        Err(LedgerError::Underage)
    } else {
        Ok(())
    }
}

/// True when `pin` is exactly four ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_pin(pin: &str) -> LedgerResult<()> {
    if is_valid_pin(pin) {
        Ok(())
    } else {
        Err(LedgerError::InvalidPin)
    }
}

/// Loose email check: an `@` somewhere, but not leading.
pub fn validate_email(email: &str) -> LedgerResult<()> {
    let trimmed = email.trim();
    if trimmed.contains('@') && !trimmed.starts_with('@') {
        Ok(())
    } else {
        Err(LedgerError::InvalidEmail)
    }
}

/// Rounds an amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Checks a deposit amount as given, then returns it rounded to cents for
/// applying.
pub fn deposit_amount(amount: f64) -> LedgerResult<f64> {
    if !amount.is_finite() || amount <= 0.0 || amount > MAX_DEPOSIT {
        return Err(LedgerError::InvalidDepositAmount);
    }
    Ok(round_cents(amount))
}

/// Checks a withdrawal amount as given against the available balance, then
/// returns it rounded to cents. Balances are whole cents, so the rounded
/// value never exceeds `balance`.
pub fn withdrawal_amount(amount: f64, balance: f64) -> LedgerResult<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::InvalidWithdrawalAmount);
    }
    if amount > balance {
        return Err(LedgerError::InsufficientBalance);
    }
    Ok(round_cents(amount).min(balance))
}
