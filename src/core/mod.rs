pub mod account_number;
pub mod account_store;
pub mod pin;
pub mod services;
pub mod utils;

pub use account_store::AccountStore;
