#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use bank_ledger::core::account_number::RandomAccountNumbers;
use bank_ledger::storage::JsonStorage;
use bank_ledger::AccountStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Store over a JSON file in its own directory, with a deterministic number
/// generator.
pub fn setup_store(seed: u64) -> (AccountStore, PathBuf) {
    let path = temp_dir().join("bank_data.json");
    let store = AccountStore::with_backend(
        Box::new(JsonStorage::new(&path)),
        Box::new(RandomAccountNumbers::seeded(seed)),
    );
    (store, path)
}

/// Opens a default account with PIN 1234 and returns its number.
pub fn open_account(store: &mut AccountStore, name: &str) -> String {
    let email = format!("{}@example.com", name.to_lowercase());
    store
        .create_account(name, 30, &email, "1234")
        .expect("create account")
        .account_number
}
