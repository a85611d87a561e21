pub mod account;
pub mod common;
pub mod validation;

pub use account::{Account, AccountSummary, TransactionKind, TransactionRecord};
pub use common::{Displayable, Identifiable};
