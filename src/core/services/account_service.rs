use crate::core::account_number::{unique_account_number, AccountNumberGenerator};
use crate::core::pin::{hash_pin, verify_pin};
use crate::domain::{
    validation::{self, round_cents},
    Account, Identifiable, TransactionKind,
};
use crate::errors::{LedgerError, LedgerResult};

/// Field changes requested by the account holder. Blank values mean "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub pin: Option<String>,
}

impl AccountUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }
}

fn provided(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Validation and mutation rules over an in-memory account collection.
/// Persistence is the caller's concern.
pub struct AccountService;

impl AccountService {
    pub fn open(
        accounts: &mut Vec<Account>,
        numbers: &mut dyn AccountNumberGenerator,
        name: &str,
        age: u32,
        email: &str,
        pin: &str,
    ) -> LedgerResult<Account> {
        validation::validate_age(age)?;
        validation::validate_pin(pin)?;
        validation::validate_email(email)?;

        let account_number = unique_account_number(numbers, |candidate| {
            accounts.iter().any(|account| account.id() == candidate)
        });
        let account = Account::new(
            name.trim(),
            age,
            email.trim(),
            hash_pin(pin),
            account_number,
        );
        accounts.push(account.clone());
        Ok(account)
    }

    /// Finds an account by number and checks its PIN. Both failure modes
    /// produce the same error so account numbers cannot be probed.
    pub fn authenticate<'a>(
        accounts: &'a mut [Account],
        account_number: &str,
        pin: &str,
    ) -> LedgerResult<&'a mut Account> {
        let account_number = account_number.trim();
        accounts
            .iter_mut()
            .find(|account| account.id() == account_number)
            .filter(|account| verify_pin(pin, &account.pin_hash))
            .ok_or(LedgerError::NotFoundOrIncorrectPin)
    }

    pub fn position(
        accounts: &[Account],
        account_number: &str,
        pin: &str,
    ) -> LedgerResult<usize> {
        let account_number = account_number.trim();
        accounts
            .iter()
            .position(|account| {
                account.id() == account_number && verify_pin(pin, &account.pin_hash)
            })
            .ok_or(LedgerError::NotFoundOrIncorrectPin)
    }

    pub fn deposit(account: &mut Account, amount: f64) -> LedgerResult<()> {
        let amount = validation::deposit_amount(amount)?;
        account.balance = round_cents(account.balance + amount);
        account.record(TransactionKind::Deposit, amount);
        Ok(())
    }

    pub fn withdraw(account: &mut Account, amount: f64) -> LedgerResult<()> {
        let amount = validation::withdrawal_amount(amount, account.balance)?;
        account.balance = round_cents(account.balance - amount);
        account.record(TransactionKind::Withdraw, amount);
        Ok(())
    }

    /// Applies the provided fields that differ from the current record.
    /// Everything is validated before anything is written.
    pub fn update(account: &mut Account, changes: &AccountUpdate) -> LedgerResult<()> {
        let name = provided(&changes.name).filter(|name| *name != account.name);
        let email = provided(&changes.email).filter(|email| *email != account.email);
        let pin = provided(&changes.pin);

        if let Some(email) = email {
            validation::validate_email(email)?;
        }
        if let Some(pin) = pin {
            if !validation::is_valid_pin(pin) {
                return Err(LedgerError::InvalidNewPin);
            }
        }
        let pin = pin.filter(|pin| !verify_pin(pin, &account.pin_hash));

        if name.is_none() && email.is_none() && pin.is_none() {
            return Err(LedgerError::NoChanges);
        }
        if let Some(name) = name {
            account.name = name.to_string();
        }
        if let Some(email) = email {
            account.email = email.to_string();
        }
        if let Some(pin) = pin {
            account.pin_hash = hash_pin(pin);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::account_number::RandomAccountNumbers;

    fn ledger_with_account() -> (Vec<Account>, String) {
        let mut accounts = Vec::new();
        let mut numbers = RandomAccountNumbers::seeded(1);
        let account = AccountService::open(
            &mut accounts,
            &mut numbers,
            "  Ada Lovelace ",
            36,
            " ada@example.com ",
            "1234",
        )
        .unwrap();
        (accounts, account.account_number)
    }

    #[test]
    fn open_trims_and_hashes() {
        let (accounts, number) = ledger_with_account();
        let account = &accounts[0];
        assert_eq!(account.account_number, number);
        assert_eq!(account.name, "Ada Lovelace");
        assert_eq!(account.email, "ada@example.com");
        assert_ne!(account.pin_hash, "1234");
        assert_eq!(account.balance, 0.0);
        assert!(account.transactions.is_empty());
    }

    #[test]
    fn open_checks_age_before_pin_and_email() {
        let mut accounts = Vec::new();
        let mut numbers = RandomAccountNumbers::seeded(1);
        let err = AccountService::open(&mut accounts, &mut numbers, "Kid", 12, "bad", "1")
            .unwrap_err();
        assert_eq!(err, LedgerError::Underage);
        let err = AccountService::open(&mut accounts, &mut numbers, "A", 30, "bad", "12345")
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidPin);
        let err = AccountService::open(&mut accounts, &mut numbers, "A", 30, "bad", "1234")
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidEmail);
        assert!(accounts.is_empty());
    }

    #[test]
    fn authenticate_hides_which_part_was_wrong() {
        let (mut accounts, number) = ledger_with_account();
        let wrong_pin = AccountService::authenticate(&mut accounts, &number, "9999").unwrap_err();
        let wrong_number =
            AccountService::authenticate(&mut accounts, "ACNOPE00", "1234").unwrap_err();
        assert_eq!(wrong_pin, wrong_number);
        assert!(AccountService::authenticate(&mut accounts, &number, "1234").is_ok());
    }

    #[test]
    fn deposit_and_withdraw_append_to_log() {
        let (mut accounts, _) = ledger_with_account();
        let account = &mut accounts[0];
        AccountService::deposit(account, 100.0).unwrap();
        AccountService::withdraw(account, 40.0).unwrap();
        assert_eq!(account.balance, 60.0);
        let kinds: Vec<_> = account.transactions.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TransactionKind::Deposit, TransactionKind::Withdraw]);
    }

    #[test]
    fn failed_withdraw_leaves_account_untouched() {
        let (mut accounts, _) = ledger_with_account();
        let account = &mut accounts[0];
        AccountService::deposit(account, 10.0).unwrap();
        let before = account.clone();
        assert_eq!(
            AccountService::withdraw(account, 10.01),
            Err(LedgerError::InsufficientBalance)
        );
        assert_eq!(*account, before);
    }

    #[test]
    fn update_blank_fields_is_no_change() {
        let (mut accounts, _) = ledger_with_account();
        let account = &mut accounts[0];
        let before = account.clone();
        let blank = AccountUpdate::default()
            .with_name("  ")
            .with_email("")
            .with_pin(" ");
        assert_eq!(AccountService::update(account, &blank), Err(LedgerError::NoChanges));
        assert_eq!(*account, before);
    }

    #[test]
    fn update_same_values_is_no_change() {
        let (mut accounts, _) = ledger_with_account();
        let account = &mut accounts[0];
        let same = AccountUpdate::default()
            .with_name("Ada Lovelace")
            .with_email("ada@example.com")
            .with_pin("1234");
        assert_eq!(AccountService::update(account, &same), Err(LedgerError::NoChanges));
    }

    #[test]
    fn update_rejects_bad_pin_without_partial_write() {
        let (mut accounts, _) = ledger_with_account();
        let account = &mut accounts[0];
        let before = account.clone();
        let changes = AccountUpdate::default().with_name("Countess").with_pin("12");
        assert_eq!(
            AccountService::update(account, &changes),
            Err(LedgerError::InvalidNewPin)
        );
        assert_eq!(*account, before);
    }

    #[test]
    fn update_changes_pin_and_name() {
        let (mut accounts, number) = ledger_with_account();
        let changes = AccountUpdate::default().with_name("Countess").with_pin("4321");
        AccountService::update(&mut accounts[0], &changes).unwrap();
        assert_eq!(accounts[0].name, "Countess");
        assert!(AccountService::authenticate(&mut accounts, &number, "1234").is_err());
        assert!(AccountService::authenticate(&mut accounts, &number, "4321").is_ok());
    }
}
