use crate::cli::commands::{CommandDefinition, ParsedArgs};
use crate::cli::core::{CliMode, CommandError, CommandResult, Prompt, ShellContext};
use crate::cli::formatting::{account_table, format_money, print_account_details};
use crate::cli::io;
use crate::core::services::AccountUpdate;
use crate::domain::Displayable;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "create",
            "Open a new account",
            "create [name] [age] [email] [pin]",
            cmd_create,
        ),
        CommandDefinition::new(
            "deposit",
            "Deposit money into an account",
            "deposit <account> <pin> <amount>",
            cmd_deposit,
        ),
        CommandDefinition::new(
            "withdraw",
            "Withdraw money from an account",
            "withdraw <account> <pin> <amount>",
            cmd_withdraw,
        ),
        CommandDefinition::new(
            "details",
            "Show profile and recent transactions",
            "details <account> <pin>",
            cmd_details,
        ),
        CommandDefinition::new(
            "update",
            "Change name, email or PIN",
            "update <account> <pin> [--name N] [--email E] [--pin P]",
            cmd_update,
        ),
        CommandDefinition::new(
            "delete",
            "Close an account permanently",
            "delete <account> <pin> [--yes]",
            cmd_delete,
        ),
        CommandDefinition::new(
            "list",
            "List every account (no PINs)",
            "list [--json]",
            cmd_list,
        ),
    ]
}

fn cmd_create(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    parsed.expect_switches(&[])?;
    let positional = &parsed.positional;

    let name = context.arg_or_prompt(positional, 0, "Full name", Prompt::Text)?;
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments("Name is required.".into()));
    }
    let age = match positional.get(1) {
        Some(raw) => parse_age(raw)?,
        None if context.mode() == CliMode::Interactive => {
            io::prompt_number(&context.theme, "Age")?
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "Missing argument: age".into(),
            ))
        }
    };
    let email = context.arg_or_prompt(positional, 2, "Email", Prompt::Text)?;
    let pin = match positional.get(3) {
        Some(pin) => pin.to_string(),
        None if context.mode() == CliMode::Interactive => {
            io::prompt_new_pin(&context.theme, "4-digit PIN")?
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "Missing argument: pin".into(),
            ))
        }
    };

    let account = context
        .store_mut()
        .create_account(&name, age, &email, &pin);
    context.report_load_warnings();
    let account = account?;
    io::print_success("Account created successfully!");
    io::print_info(format!("Account number: {}", account.account_number));
    io::print_hint("Please store your account number and PIN safely. PINs are not recoverable.");
    Ok(())
}

fn cmd_deposit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (number, pin) = credentials(context, args)?;
    let raw = context.arg_or_prompt(args, 2, "Amount", Prompt::Text)?;
    let amount = parse_amount(&raw)?;
    let account = context.store_mut().deposit(&number, &pin, amount);
    context.report_load_warnings();
    let account = account?;
    io::print_success(format!(
        "Deposit successful. New balance: {}",
        format_money(account.balance)
    ));
    Ok(())
}

fn cmd_withdraw(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (number, pin) = credentials(context, args)?;
    let raw = context.arg_or_prompt(args, 2, "Amount", Prompt::Text)?;
    let amount = parse_amount(&raw)?;
    let account = context.store_mut().withdraw(&number, &pin, amount);
    context.report_load_warnings();
    let account = account?;
    io::print_success(format!(
        "Withdrawal successful. New balance: {}",
        format_money(account.balance)
    ));
    Ok(())
}

fn cmd_details(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (number, pin) = credentials(context, args)?;
    let account = context.store_mut().details(&number, &pin);
    context.report_load_warnings();
    print_account_details(&account?, context.config.history_limit);
    Ok(())
}

fn cmd_update(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["name", "email", "pin"])?;
    parsed.expect_switches(&[])?;
    let (number, pin) = credentials(context, &parsed.positional)?;

    let flagged = ["name", "email", "pin"]
        .iter()
        .any(|key| parsed.option(key).is_some());
    let changes = if flagged || context.mode() == CliMode::Script {
        AccountUpdate {
            name: parsed.option("name").map(str::to_string),
            email: parsed.option("email").map(str::to_string),
            pin: parsed.option("pin").map(str::to_string),
        }
    } else {
        io::print_hint("Leave a field blank to keep its current value.");
        let name = io::prompt_text(&context.theme, "New name")?;
        let email = io::prompt_text(&context.theme, "New email")?;
        let new_pin = io::prompt_secret(&context.theme, "New 4-digit PIN")?;
        AccountUpdate {
            name: Some(name),
            email: Some(email),
            pin: Some(new_pin),
        }
    };

    let result = context.store_mut().update_details(&number, &pin, &changes);
    context.report_load_warnings();
    result?;
    io::print_success("Account updated successfully.");
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    parsed.expect_switches(&["yes"])?;
    let (number, pin) = credentials(context, &parsed.positional)?;

    let account = context.store_mut().details(&number, &pin);
    context.report_load_warnings();
    let account = account?;

    if !parsed.has_switch("yes") {
        match context.mode() {
            CliMode::Script => {
                io::print_warning("Deletion requires confirmation. Re-run with `--yes`.");
                return Ok(());
            }
            CliMode::Interactive => {
                let prompt = format!(
                    "Delete account {}? This cannot be undone.",
                    account.display_label()
                );
                if !io::confirm_action(&context.theme, &prompt, false)? {
                    io::print_info("Deletion cancelled.");
                    return Ok(());
                }
            }
        }
    }

    let removed = context.store_mut().delete_account(&number, &pin)?;
    io::print_success(format!(
        "Account {} deleted successfully.",
        removed.account_number
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &[])?;
    parsed.expect_switches(&["json"])?;
    let summaries = context.store_mut().summaries();
    context.report_load_warnings();

    if parsed.has_switch("json") {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    io::print_info(format!("Total accounts: {}", summaries.len()));
    if summaries.is_empty() {
        return Ok(());
    }
    for line in account_table(&summaries) {
        io::print_info(line);
    }
    Ok(())
}

fn credentials(context: &ShellContext, args: &[&str]) -> Result<(String, String), CommandError> {
    let number = context.arg_or_prompt(args, 0, "Account number", Prompt::Text)?;
    let pin = context.arg_or_prompt(args, 1, "PIN", Prompt::Secret)?;
    Ok((number.trim().to_string(), pin))
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("Invalid amount `{raw}`.")))
}

pub(crate) fn parse_age(raw: &str) -> Result<u32, CommandError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid age `{raw}`.")))
}
