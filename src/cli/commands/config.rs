use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::two_column;
use crate::cli::io;
use crate::cli::output::section;
use crate::config::{Config, CONFIG_KEYS};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change CLI preferences",
        "config [show|set <key> <value>|reset]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = args.first().map(|arg| arg.to_lowercase());
    match action.as_deref() {
        None | Some("show") => {
            show_config(context);
            Ok(())
        }
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            let mut config = context.config.clone();
            config.set(&key, &value)?;
            context.apply_config(config)?;
            io::print_success(format!("Updated `{key}`."));
            Ok(())
        }
        Some("reset") => {
            context.apply_config(Config::default())?;
            io::print_success("Configuration reset to defaults.");
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "Unknown config action `{other}`. Expected show, set or reset."
        ))),
    }
}

fn show_config(context: &ShellContext) {
    section("Configuration");
    let config = &context.config;
    let configured = config
        .data_file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(default)".into());
    let rows = two_column(&[
        ("Config file", context.config_manager.path().display().to_string()),
        ("data-file", configured),
        ("Active data file", context.store().path().display().to_string()),
        ("history-limit", config.history_limit.to_string()),
        (
            "plain-output",
            if config.plain_output { "on" } else { "off" }.to_string(),
        ),
    ]);
    for row in rows {
        io::print_info(row);
    }
}
