//! File-backed account ledger.
//!
//! Every operation reloads the whole collection from the backend, applies one
//! validated change and writes the whole collection back. There is no locking:
//! two processes sharing a data file can overwrite each other's changes.

use std::path::{Path, PathBuf};

use crate::core::account_number::{AccountNumberGenerator, RandomAccountNumbers};
use crate::core::services::{AccountService, AccountUpdate};
use crate::domain::{Account, AccountSummary};
use crate::errors::LedgerResult;
use crate::storage::{JsonStorage, StorageBackend};

/// Owns the in-memory account list and the backend it mirrors.
pub struct AccountStore {
    accounts: Vec<Account>,
    storage: Box<dyn StorageBackend>,
    numbers: Box<dyn AccountNumberGenerator>,
    warnings: Vec<String>,
}

impl AccountStore {
    /// Opens the JSON data file at `path`, creating it when missing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(
            Box::new(JsonStorage::new(path)),
            Box::new(RandomAccountNumbers::new()),
        )
    }

    pub fn with_backend(
        storage: Box<dyn StorageBackend>,
        numbers: Box<dyn AccountNumberGenerator>,
    ) -> Self {
        let mut store = Self {
            accounts: Vec::new(),
            storage,
            numbers,
            warnings: Vec::new(),
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Accounts as of the last load or mutation.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Problems met by the most recent load, if any.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Replaces the in-memory collection with the backend's contents.
    pub fn load(&mut self) -> &[Account] {
        let report = self.storage.load();
        if report.created {
            tracing::info!(path = %self.path().display(), "initialized empty data file");
        }
        self.accounts = report.accounts;
        self.warnings = report.warnings;
        &self.accounts
    }

    /// Writes the full in-memory collection to the backend.
    pub fn save(&self) -> LedgerResult<()> {
        self.storage.save(&self.accounts)
    }

    pub fn create_account(
        &mut self,
        name: &str,
        age: u32,
        email: &str,
        pin: &str,
    ) -> LedgerResult<Account> {
        self.load();
        let mut next = self.accounts.clone();
        let account = AccountService::open(
            &mut next,
            self.numbers.as_mut(),
            name,
            age,
            email,
            pin,
        )?;
        self.commit(next)?;
        tracing::info!(account = %account.account_number, "account created");
        Ok(account)
    }

    pub fn deposit(&mut self, account_number: &str, pin: &str, amount: f64) -> LedgerResult<Account> {
        self.mutate(account_number, pin, "deposit", |account| {
            AccountService::deposit(account, amount)
        })
    }

    pub fn withdraw(
        &mut self,
        account_number: &str,
        pin: &str,
        amount: f64,
    ) -> LedgerResult<Account> {
        self.mutate(account_number, pin, "withdraw", |account| {
            AccountService::withdraw(account, amount)
        })
    }

    pub fn update_details(
        &mut self,
        account_number: &str,
        pin: &str,
        changes: &AccountUpdate,
    ) -> LedgerResult<Account> {
        self.mutate(account_number, pin, "update", |account| {
            AccountService::update(account, changes)
        })
    }

    /// Removes the account and returns the deleted record. Callers are
    /// expected to have obtained the holder's confirmation first.
    pub fn delete_account(&mut self, account_number: &str, pin: &str) -> LedgerResult<Account> {
        self.load();
        let index = AccountService::position(&self.accounts, account_number, pin)
            .inspect_err(|_| tracing::warn!(operation = "delete", "account verification failed"))?;
        let mut next = self.accounts.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        tracing::info!(account = %removed.account_number, "account deleted");
        Ok(removed)
    }

    /// Verified read of a single account. Nothing is written.
    pub fn details(&mut self, account_number: &str, pin: &str) -> LedgerResult<Account> {
        self.load();
        let account = AccountService::authenticate(&mut self.accounts, account_number, pin)
            .inspect_err(|_| tracing::warn!(operation = "details", "account verification failed"))?;
        Ok(account.clone())
    }

    /// Every account without its PIN hash, freshly loaded.
    pub fn summaries(&mut self) -> Vec<AccountSummary> {
        self.load().iter().map(AccountSummary::from).collect()
    }

    /// Writes `next` and adopts it only once the backend accepted it, so a
    /// failed save leaves the in-memory view matching the file.
    fn commit(&mut self, next: Vec<Account>) -> LedgerResult<()> {
        self.storage.save(&next)?;
        self.accounts = next;
        Ok(())
    }

    fn mutate(
        &mut self,
        account_number: &str,
        pin: &str,
        operation: &'static str,
        apply: impl FnOnce(&mut Account) -> LedgerResult<()>,
    ) -> LedgerResult<Account> {
        self.load();
        let mut next = self.accounts.clone();
        let account = AccountService::authenticate(&mut next, account_number, pin)
            .inspect_err(|_| tracing::warn!(operation, "account verification failed"))?;
        apply(account)?;
        let updated = account.clone();
        self.commit(next)?;
        tracing::info!(operation, account = %updated.account_number, balance = updated.balance, "account updated");
        Ok(updated)
    }
}
