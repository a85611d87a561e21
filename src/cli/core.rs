//! Shell context, dispatch and error reporting.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::AccountStore,
    errors::LedgerError,
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;
use super::output::{self, OutputPreferences};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

/// Failures of a single command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Whether a missing argument may be asked for on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prompt {
    Text,
    Secret,
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) store: AccountStore,
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: Config,
    pub(crate) theme: ColorfulTheme,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "falling back to default configuration");
                cli_io::print_warning(format!("{err}. Using default settings."));
                Config::default()
            }
        };
        let store = AccountStore::open(config.resolve_data_file(config_manager.base_dir()));
        Ok(Self::with_store(mode, store, config_manager, config))
    }

    pub fn with_store(
        mode: CliMode,
        store: AccountStore,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        apply_output_preferences(&config);
        let context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.report_load_warnings();
        tracing::debug!(path = %context.store.path().display(), "shell ready");
        context
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut AccountStore {
        &mut self.store
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        "bank> ".to_string()
    }

    /// Persists the current configuration and re-opens the store when the
    /// data file location changed.
    pub(crate) fn apply_config(&mut self, config: Config) -> CommandResult {
        self.config_manager.save(&config)?;
        let base = self.config_manager.base_dir();
        let new_path = config.resolve_data_file(base);
        if new_path != self.store.path() {
            self.store = AccountStore::open(new_path);
            self.report_load_warnings();
        }
        apply_output_preferences(&config);
        self.config = config;
        Ok(())
    }

    /// Returns `args[index]`, or asks for it when the shell is interactive.
    pub(crate) fn arg_or_prompt(
        &self,
        args: &[&str],
        index: usize,
        label: &str,
        prompt: Prompt,
    ) -> Result<String, CommandError> {
        if let Some(value) = args.get(index) {
            return Ok(value.to_string());
        }
        match (self.mode, prompt) {
            (CliMode::Interactive, Prompt::Text) => cli_io::prompt_text(&self.theme, label),
            (CliMode::Interactive, Prompt::Secret) => cli_io::prompt_secret(&self.theme, label),
            (CliMode::Script, _) => Err(CommandError::InvalidArguments(format!(
                "Missing argument: {}",
                label.to_ascii_lowercase()
            ))),
        }
    }

    pub(crate) fn report_load_warnings(&self) {
        for warning in self.store.warnings() {
            cli_io::print_warning(warning);
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(definition) = self.registry.get(command).cloned() else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        tracing::debug!(command = definition.name, "dispatching command");
        match (definition.handler)(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &lowered), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> bool {
        if self.mode == CliMode::Script {
            return true;
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).unwrap_or(true)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            other => cli_io::print_error(other),
        }
    }
}

fn apply_output_preferences(config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script_context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let store = AccountStore::open(temp.path().join("bank_data.json"));
        let context = ShellContext::with_store(CliMode::Script, store, manager, Config::default());
        (context, temp)
    }

    #[test]
    fn missing_arguments_fail_in_script_mode() {
        let (context, _guard) = script_context();
        let err = context
            .arg_or_prompt(&[], 0, "Account number", Prompt::Text)
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing argument: account number");
        let value = context
            .arg_or_prompt(&["AC123456"], 0, "Account number", Prompt::Text)
            .unwrap();
        assert_eq!(value, "AC123456");
    }

    #[test]
    fn exit_command_stops_the_loop() {
        let (mut context, _guard) = script_context();
        let control = context.dispatch("exit", "exit", &[]).unwrap();
        assert_eq!(control, LoopControl::Exit);
    }

    #[test]
    fn unknown_command_keeps_running() {
        let (mut context, _guard) = script_context();
        let control = context.dispatch("depost", "depost", &[]).unwrap();
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn changing_data_file_reopens_store() {
        let (mut context, guard) = script_context();
        let mut config = context.config.clone();
        let target = guard.path().join("other.json");
        config.data_file = Some(target.clone());
        context.apply_config(config).unwrap();
        if crate::core::utils::PathResolver::data_file_override().is_none() {
            assert_eq!(context.store().path(), target.as_path());
            assert!(target.exists());
        }
    }
}
