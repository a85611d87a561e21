pub mod commands;
pub mod core;
pub mod formatting;
mod help;
pub mod io;
pub mod output;
mod shell;

pub use shell::{run_cli, SCRIPT_ENV};
