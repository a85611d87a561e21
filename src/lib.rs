#![doc(test(attr(deny(warnings))))]

//! Bank Ledger keeps customer accounts in a single JSON file and exposes the
//! account operations (open, deposit, withdraw, update, close) to a command
//! shell.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::AccountUpdate;
pub use crate::core::AccountStore;
pub use crate::errors::{LedgerError, LedgerResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Bank Ledger tracing initialized.");
    });
}
