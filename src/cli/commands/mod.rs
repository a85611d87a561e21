use std::collections::HashMap;

pub mod account;
pub mod config;
pub mod system;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(account::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

/// Positional arguments plus `--flag` switches and `--key value` options.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    pub options: HashMap<&'a str, &'a str>,
    pub switches: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    /// Splits `args`; names listed in `value_options` consume the following
    /// token (or the part after `=`), any other `--name` is a switch.
    pub fn parse(args: &[&'a str], value_options: &[&str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(name) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            if let Some((key, value)) = name.split_once('=') {
                if !value_options.contains(&key) {
                    return Err(CommandError::InvalidArguments(format!(
                        "Option `--{key}` does not take a value"
                    )));
                }
                parsed.options.insert(key, value);
            } else if value_options.contains(&name) {
                let value = iter.next().ok_or_else(|| {
                    CommandError::InvalidArguments(format!("Option `--{name}` expects a value"))
                })?;
                parsed.options.insert(name, value);
            } else {
                parsed.switches.push(name);
            }
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied()
    }

    pub fn has_switch(&self, name: &str) -> bool {
        self.switches.contains(&name)
    }

    /// Rejects switches outside `allowed`.
    pub fn expect_switches(&self, allowed: &[&str]) -> Result<(), CommandError> {
        match self.switches.iter().find(|switch| !allowed.contains(*switch)) {
            Some(unknown) => Err(CommandError::InvalidArguments(format!(
                "Unknown option `--{unknown}`"
            ))),
            None => Ok(()),
        }
    }
}
