pub mod json_backend;

use std::path::Path;

use crate::{domain::Account, errors::LedgerResult};

/// Outcome of reading the backing file. Loading never fails: problems are
/// reported as warnings and the collection starts empty.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub accounts: Vec<Account>,
    pub created: bool,
    pub warnings: Vec<String>,
}

/// Abstraction over persistence backends holding the full account collection.
pub trait StorageBackend {
    fn load(&self) -> LoadReport;
    fn save(&self, accounts: &[Account]) -> LedgerResult<()>;
    fn path(&self) -> &Path;
}

pub use json_backend::JsonStorage;
