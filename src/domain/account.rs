use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};

/// A bank customer's account as persisted in the data file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub pin_hash: String,
    #[serde(rename = "accountNo")]
    pub account_number: String,
    pub balance: f64,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

impl Account {
    /// Creates an empty-balance account; callers validate fields beforehand.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
        pin_hash: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
            pin_hash: pin_hash.into(),
            account_number: account_number.into(),
            balance: 0.0,
            transactions: Vec::new(),
        }
    }

    /// Appends an entry to the transaction log, stamped with the current time.
    pub fn record(&mut self, kind: TransactionKind, amount: f64) {
        self.transactions.push(TransactionRecord {
            kind,
            amount,
            timestamp: Utc::now(),
        });
    }

    /// Returns up to `limit` transactions, newest first.
    pub fn recent_transactions(&self, limit: usize) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions.iter().rev().take(limit)
    }
}

impl Identifiable for Account {
    fn id(&self) -> &str {
        &self.account_number
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.account_number)
    }
}

/// Entry in an account's append-only transaction log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
        }
    }
}

/// Account view safe to show to an administrator: everything except the PIN hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountSummary {
    #[serde(rename = "accountNo")]
    pub account_number: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub balance: f64,
    pub transactions: Vec<TransactionRecord>,
}

impl AccountSummary {
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.account_number.clone(),
            name: account.name.clone(),
            age: account.age,
            email: account.email.clone(),
            balance: account.balance,
            transactions: account.transactions.clone(),
        }
    }
}
